//! Demo row type and mock data generation.

use chrono::DateTime;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Deserialize;
use serde::Serialize;

use tablestate_lib::model::FieldValue;
use tablestate_lib::model::SortableRow;

/// Sortable columns of the demo table, as `(field id, header label)`.
pub const COLUMNS: [(&str, &str); 5] = [
    ("id", "ID"),
    ("name", "Name"),
    ("surname", "Surname"),
    ("age", "Age"),
    ("joined", "Joined"),
];

/// One row of the demo table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub age: u32,
    pub joined: DateTime<Utc>,
}

impl SortableRow for Person {
    fn sort_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            "surname" => Some(self.surname.clone().into()),
            "age" => Some(self.age.into()),
            "joined" => Some(self.joined.into()),
            _ => None,
        }
    }
}

const FIRST_NAMES: [&str; 12] = [
    "John", "Alex", "Derek", "Maria", "Ines", "Tom", "Sofia", "Liam", "Emma", "Noah", "Olivia",
    "Lucas",
];

const LAST_NAMES: [&str; 10] = [
    "Doe", "Smith", "Johnson", "Brown", "Garcia", "Miller", "Davis", "Martinez", "Lopez", "Wilson",
];

/// Generates `count` random rows with sequential ids starting at 1.
///
/// A seed makes the set reproducible across restarts, which keeps URLs
/// meaningful when sharing links to a demo instance.
pub fn make_rows(count: usize, seed: Option<u64>) -> Vec<Person> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Join dates spread over roughly eight years from 2018-01-01.
    let epoch = DateTime::from_timestamp(1_514_764_800, 0).unwrap_or_default();

    (1..=count)
        .map(|id| Person {
            id: id as u32,
            name: FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())].to_string(),
            surname: LAST_NAMES[rng.random_range(0..LAST_NAMES.len())].to_string(),
            age: rng.random_range(0..=40),
            joined: epoch + chrono::Duration::days(rng.random_range(0..3000)),
        })
        .collect()
}
