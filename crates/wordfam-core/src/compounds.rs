//! Curated compound words and phrasal forms, keyed by root word.
//!
//! These are idiomatic combinations that morphological analysis cannot find.

const COMPOUNDS: &[(&str, &[&str])] = &[
    ("run", &["runway", "runaway", "runoff", "rundown", "run-up", "runner-up", "run-through", "running mate", "home run", "dry run", "trial run"]),
    ("win", &["breadwinner", "win-win", "winning streak"]),
    ("break", &["breakthrough", "breakdown", "breakup", "breakout", "breakfast", "break-in", "breakwater", "spring break", "commercial break"]),
    ("take", &["takeover", "takeoff", "takeout", "take-home", "intake", "uptake", "double-take"]),
    ("make", &["makeup", "makeover", "makeshift", "remake", "peacemaker", "troublemaker", "matchmaker", "filmmaker", "lawmaker"]),
    ("work", &["workout", "workshop", "workload", "workstation", "homework", "framework", "teamwork", "artwork", "handiwork", "metalwork"]),
    ("over", &["overall", "overcome", "overflow", "overlook", "overseas", "overnight", "overturn", "overdue", "overgrown"]),
    ("under", &["understand", "undergo", "undercover", "underground", "underdog", "underway", "underwear", "underline", "underneath"]),
    ("out", &["outcome", "output", "outbreak", "outlet", "outline", "outlook", "outside", "outstanding", "outgoing", "outright"]),
    ("up", &["update", "upgrade", "upload", "upbeat", "upcoming", "upfront", "uphill", "upright", "upset", "uptown", "upward"]),
    ("down", &["download", "downfall", "downgrade", "downhill", "downplay", "downpour", "downright", "downside", "downstream", "downtown"]),
    ("back", &["backup", "background", "backbone", "backfire", "backpack", "backstage", "backward", "comeback", "feedback", "flashback"]),
    ("hand", &["handbook", "handmade", "handout", "handwriting", "handy", "firsthand", "secondhand", "handshake", "handiwork"]),
    ("head", &["headline", "headache", "headquarters", "headway", "heading", "overhead", "forehead", "masthead", "arrowhead"]),
    ("life", &["lifetime", "lifestyle", "lifeguard", "lifelike", "lifeline", "wildlife", "nightlife", "afterlife", "half-life"]),
    ("time", &["timeline", "timeout", "timekeeper", "timeless", "overtime", "pastime", "longtime", "full-time", "part-time", "bedtime"]),
    ("way", &["pathway", "railway", "highway", "subway", "driveway", "doorway", "halfway", "waterway", "walkway", "airway"]),
    ("water", &["waterfall", "waterproof", "watermelon", "waterfront", "watercolor", "underwater", "seawater", "freshwater", "wastewater"]),
    ("fire", &["fireplace", "fireworks", "firewall", "firefighter", "fireproof", "wildfire", "campfire", "bonfire", "gunfire"]),
    ("set", &["upset", "offset", "onset", "outset", "sunset", "mindset", "setup", "setback", "dataset"]),
    ("put", &["input", "output", "putdown", "throughput"]),
    ("turn", &["turnover", "turnout", "turnaround", "downturn", "upturn", "overturn"]),
    ("cut", &["cutoff", "cutback", "shortcut", "haircut", "clear-cut"]),
    ("look", &["outlook", "overlook", "lookout", "onlooker", "good-looking"]),
    ("stand", &["understand", "outstanding", "standby", "standpoint", "grandstand"]),
    ("hold", &["household", "shareholder", "foothold", "stronghold", "threshold", "uphold", "withhold", "behold"]),
    ("land", &["landmark", "landscape", "mainland", "homeland", "wonderland", "borderland", "grassland", "farmland", "wasteland"]),
];

/// Compounds listed for `root`, empty when the root is not curated
pub fn compounds_for(root: &str) -> &'static [&'static str] {
    COMPOUNDS
        .iter()
        .find(|(r, _)| *r == root)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

/// Whether `word` appears anywhere in the curated list
pub fn is_curated_compound(word: &str) -> bool {
    COMPOUNDS.iter().any(|(_, words)| words.contains(&word))
}

/// Every curated compound containing `root`, ignoring hyphens and spaces
pub fn compounds_containing(root: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    for (_, words) in COMPOUNDS {
        for &word in words.iter() {
            let squashed: String = word.chars().filter(|c| *c != '-' && *c != ' ').collect();
            if squashed.contains(root) && !found.contains(&word) {
                found.push(word);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compounds_for_run() {
        let compounds = compounds_for("run");
        assert!(compounds.contains(&"runner-up"));
        assert!(compounds.contains(&"home run"));
        assert!(compounds_for("zebra").is_empty());
    }

    #[test]
    fn test_is_curated_compound() {
        assert!(is_curated_compound("running mate"));
        assert!(is_curated_compound("overlook"));
        assert!(!is_curated_compound("running"));
    }

    #[test]
    fn test_compounds_containing_dedupes_across_roots() {
        let found = compounds_containing("look");
        assert_eq!(found.iter().filter(|w| **w == "outlook").count(), 1);
        assert!(found.contains(&"good-looking"));
    }
}
