//! Built-in substitution tables.
//!
//! Pairs are chosen for how easily an interpreter confuses them, either by
//! sound (hypertension / hypotension) or by meaning flipping to an antonym
//! (acute / chronic).

/// Medical terms and their confusable counterparts.
pub const MEDICAL: &[(&str, &[&str])] = &[
    ("hypertension", &["hypotension", "hyperextension"]),
    ("hypotension", &["hypertension"]),
    ("hyperglycemia", &["hypoglycemia"]),
    ("hypoglycemia", &["hyperglycemia"]),
    ("infection", &["inflammation", "infusion"]),
    ("inflammation", &["infection"]),
    ("prescription", &["proscription", "description"]),
    ("dose", &["dosage"]),
    ("tablet", &["capsule"]),
    ("capsule", &["tablet"]),
    ("chronic", &["acute"]),
    ("acute", &["chronic"]),
    ("malignant", &["benign"]),
    ("benign", &["malignant"]),
    ("symptom", &["syndrome"]),
    ("diagnosis", &["prognosis"]),
    ("prognosis", &["diagnosis"]),
    ("allergy", &["allergic reaction"]),
    ("breathe", &["breath"]),
    ("breath", &["breathe"]),
    ("ingest", &["inject"]),
    ("inject", &["ingest"]),
    ("oral", &["aural"]),
    ("bacteria", &["virus"]),
    ("virus", &["bacteria"]),
    ("intravenous", &["intramuscular"]),
    ("intramuscular", &["intravenous"]),
];

/// Numbers commonly misheard for one another, spelled out and as digits.
pub const NUMBERS: &[(&str, &[&str])] = &[
    ("thirteen", &["thirty"]),
    ("thirty", &["thirteen"]),
    ("fourteen", &["forty"]),
    ("forty", &["fourteen"]),
    ("fifteen", &["fifty"]),
    ("fifty", &["fifteen"]),
    ("sixteen", &["sixty"]),
    ("sixty", &["sixteen"]),
    ("13", &["30"]),
    ("30", &["13"]),
    ("14", &["40"]),
    ("40", &["14"]),
    ("15", &["50"]),
    ("50", &["15"]),
    ("16", &["60"]),
    ("60", &["16"]),
];

/// Negation and frequency qualifiers whose omission changes the meaning.
pub const QUALIFIERS: &[&str] = &[
    "not", "no", "without", "never", "rarely", "sometimes", "often", "always", "very",
    "slightly", "mildly", "severely",
];

/// Temporal and directional terms paired with their opposites.
///
/// daily/weekly is left out: frequency words collide with too many dosage
/// sentences and are easy to add per injector.
pub const TEMPORAL: &[(&str, &[&str])] = &[
    ("before", &["after"]),
    ("after", &["before"]),
    ("morning", &["evening"]),
    ("evening", &["morning"]),
    ("increase", &["decrease"]),
    ("decrease", &["increase"]),
    ("start", &["stop"]),
    ("stop", &["start"]),
    ("continue", &["discontinue"]),
    ("discontinue", &["continue"]),
    ("left side", &["right side"]),
    ("right side", &["left side"]),
    ("left arm", &["right arm"]),
    ("right arm", &["left arm"]),
    ("left leg", &["right leg"]),
    ("right leg", &["left leg"]),
    ("above", &["below"]),
    ("below", &["above"]),
];
