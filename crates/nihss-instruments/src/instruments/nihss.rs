use std::sync::LazyLock;

use crate::catalog::ItemCatalog;
use crate::scoring::{Item, ItemOption};
use crate::Instrument;

/// NIHSS: NIH Stroke Scale.
/// 15 items, total 0–42. Item 1a = 3 (coma) applies fixed defaults to every
/// item except 2 (gaze) and 3 (visual fields), which still require examination.
pub struct Nihss;

impl Instrument for Nihss {
    fn id(&self) -> &str {
        "nihss"
    }

    fn name(&self) -> &str {
        "NIH Stroke Scale"
    }

    fn catalog(&self) -> &'static ItemCatalog {
        static CATALOG: LazyLock<ItemCatalog> = LazyLock::new(|| {
            ItemCatalog::new(items(), ("1a", 3), COMA_DEFAULTS)
                .expect("NIHSS item table is internally consistent")
        });
        &CATALOG
    }
}

const COMA_DEFAULTS: &[(&str, u8)] = &[
    ("1b", 2),
    ("1c", 2),
    ("4", 3),
    ("5a", 4),
    ("5b", 4),
    ("6a", 4),
    ("6b", 4),
    ("7", 0),
    ("8", 2),
    ("9", 3),
    ("10", 2),
    ("11", 2),
];

const MOTOR: &[&str] = &[
    "No drift",
    "Drift",
    "Some effort vs gravity",
    "No effort vs gravity",
    "No movement",
];

fn items() -> Vec<Item> {
    vec![
        Item {
            id: "1a".to_string(),
            name: "1a. Level of Consciousness".to_string(),
            info: Some(
                "A 3 is scored only if the patient makes no movement (other than reflexive) \
                 in response to noxious stimulation."
                    .to_string(),
            ),
            options: scored(&[
                "Alert",
                "Not Alert (arousable)",
                "Not Alert (requires stimulation)",
                "Unresponsive (Coma)",
            ]),
        },
        item(
            "1b",
            "1b. LOC Questions",
            scored(&[
                "Answers both correctly",
                "Answers one correctly",
                "Answers neither correctly",
            ]),
        ),
        item(
            "1c",
            "1c. LOC Commands",
            scored(&[
                "Performs both correctly",
                "Performs one correctly",
                "Performs neither correctly",
            ]),
        ),
        item(
            "2",
            "2. Best Gaze (Oculocephalic)",
            scored(&["Normal", "Partial gaze palsy", "Forced deviation"]),
        ),
        item(
            "3",
            "3. Visual Fields (Bilateral Threat)",
            scored(&[
                "No visual loss",
                "Partial hemianopia",
                "Complete hemianopia",
                "Bilateral hemianopia",
            ]),
        ),
        item(
            "4",
            "4. Facial Palsy",
            scored(&[
                "Normal movement",
                "Minor paralysis",
                "Partial paralysis",
                "Complete paralysis",
            ]),
        ),
        item("5a", "5a. Left Arm Motor", with_untestable(MOTOR)),
        item("5b", "5b. Right Arm Motor", with_untestable(MOTOR)),
        item("6a", "6a. Left Leg Motor", with_untestable(MOTOR)),
        item("6b", "6b. Right Leg Motor", with_untestable(MOTOR)),
        item(
            "7",
            "7. Limb Ataxia",
            with_untestable(&["Absent", "Present in one limb", "Present in two limbs"]),
        ),
        item(
            "8",
            "8. Sensory",
            scored(&["Normal", "Mild-to-moderate loss", "Severe-to-total loss"]),
        ),
        item(
            "9",
            "9. Best Language",
            scored(&[
                "No aphasia",
                "Mild-to-moderate aphasia",
                "Severe aphasia",
                "Mute/Global aphasia",
            ]),
        ),
        item(
            "10",
            "10. Dysarthria",
            with_untestable(&["Normal", "Mild-to-moderate dysarthria", "Severe dysarthria"]),
        ),
        item(
            "11",
            "11. Extinction/Inattention",
            scored(&["No abnormality", "Partial inattention", "Profound inattention"]),
        ),
    ]
}

fn item(id: &str, name: &str, options: Vec<ItemOption>) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        info: None,
        options,
    }
}

/// Options scored by position: the first is worth 0, the next 1, and so on.
fn scored(labels: &[&str]) -> Vec<ItemOption> {
    labels
        .iter()
        .zip(0u8..)
        .map(|(label, points)| ItemOption {
            label: label.to_string(),
            points,
            untestable: false,
        })
        .collect()
}

fn with_untestable(labels: &[&str]) -> Vec<ItemOption> {
    let mut options = scored(labels);
    options.push(ItemOption {
        label: "Untestable".to_string(),
        points: 0,
        untestable: true,
    });
    options
}
