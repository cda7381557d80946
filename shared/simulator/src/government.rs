use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct GovernmentHandle(pub usize);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Government {
    pub name: String,
}

/// Faction registry with a symmetric hostility relation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Governments {
    governments: Vec<Government>,
    enemies: BTreeSet<(GovernmentHandle, GovernmentHandle)>,
}

impl Governments {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, name: &str) -> GovernmentHandle {
        self.governments.push(Government {
            name: name.to_string(),
        });
        GovernmentHandle(self.governments.len() - 1)
    }

    pub fn get(&self, handle: GovernmentHandle) -> Option<&Government> {
        self.governments.get(handle.0)
    }

    pub fn set_enemy(&mut self, a: GovernmentHandle, b: GovernmentHandle) {
        self.enemies.insert((a, b));
        self.enemies.insert((b, a));
    }

    pub fn make_peace(&mut self, a: GovernmentHandle, b: GovernmentHandle) {
        self.enemies.remove(&(a, b));
        self.enemies.remove(&(b, a));
    }

    /// Ships without a government are nobody's enemy.
    pub fn is_enemy(&self, a: GovernmentHandle, b: Option<GovernmentHandle>) -> bool {
        match b {
            Some(b) => self.enemies.contains(&(a, b)),
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_hostility_is_symmetric() {
        let mut governments = Governments::new();
        let merchant = governments.add("Merchant");
        let pirate = governments.add("Pirate");
        let militia = governments.add("Militia");
        governments.set_enemy(pirate, merchant);

        assert!(governments.is_enemy(merchant, Some(pirate)));
        assert!(governments.is_enemy(pirate, Some(merchant)));
        assert!(!governments.is_enemy(merchant, Some(militia)));
        assert!(!governments.is_enemy(merchant, Some(merchant)));
        assert!(!governments.is_enemy(pirate, None));

        governments.make_peace(merchant, pirate);
        assert!(!governments.is_enemy(pirate, Some(merchant)));
        assert_eq!(governments.get(militia).unwrap().name, "Militia");
    }
}
