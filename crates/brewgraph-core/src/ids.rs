//! Composite node ids and relationship names.
//!
//! Every id is `<prefix>:<slug>[:<slug>...]`. Slugs never contain `:`, so the
//! component boundaries are unambiguous and an id depends on the whole
//! natural key, not a prefix of it.

use crate::record::BrewRecord;
use crate::slug::slugify;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    Produces,
    RoastedAs,
    UsesGrinder,
    BrewedWith,
    UsesRoast,
    EvaluatedAs,
    HasNote,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::Produces,
        Relation::RoastedAs,
        Relation::UsesGrinder,
        Relation::BrewedWith,
        Relation::UsesRoast,
        Relation::EvaluatedAs,
        Relation::HasNote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Produces => "PRODUCES",
            Relation::RoastedAs => "ROASTED_AS",
            Relation::UsesGrinder => "USES_GRINDER",
            Relation::BrewedWith => "BREWED_WITH",
            Relation::UsesRoast => "USES_ROAST",
            Relation::EvaluatedAs => "EVALUATED_AS",
            Relation::HasNote => "HAS_NOTE",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compose(prefix: &str, parts: &[&str]) -> String {
    let mut id = String::from(prefix);
    for part in parts {
        id.push(':');
        id.push_str(&slugify(part));
    }
    id
}

pub fn roaster_id(roaster: &str) -> String {
    compose("roaster", &[roaster])
}

pub fn bean_lot_id(roaster: &str, coffee_name: &str) -> String {
    compose("bean", &[roaster, coffee_name])
}

pub fn roast_batch_id(roaster: &str, coffee_name: &str, roast_level: &str) -> String {
    compose("roast", &[roaster, coffee_name, roast_level])
}

pub fn grinder_id(grinder: &str) -> String {
    compose("grinder", &[grinder])
}

pub fn brewer_id(brand: &str, model: &str) -> String {
    compose("brewer", &[brand, model])
}

pub fn session_id(brew_id: &str) -> String {
    compose("brew", &[brew_id])
}

pub fn evaluation_id(brew_id: &str) -> String {
    compose("eval", &[brew_id])
}

pub fn note_id(note: &str) -> String {
    compose("note", &[note])
}

/// Ids of every fixed entity a single record touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIds {
    pub roaster: String,
    pub bean_lot: String,
    pub roast_batch: String,
    pub grinder: String,
    pub brewer: String,
    pub session: String,
    pub evaluation: String,
}

impl EntityIds {
    pub fn for_record(record: &BrewRecord) -> Self {
        Self {
            roaster: roaster_id(&record.roaster),
            bean_lot: bean_lot_id(&record.roaster, &record.coffee_name),
            roast_batch: roast_batch_id(&record.roaster, &record.coffee_name, &record.roast_level),
            grinder: grinder_id(&record.grinder),
            brewer: brewer_id(&record.brewer_brand, &record.brewer_model),
            session: session_id(&record.brew_id),
            evaluation: evaluation_id(&record.brew_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_templates() {
        assert_eq!(roaster_id("Onyx Coffee Lab"), "roaster:onyx-coffee-lab");
        assert_eq!(bean_lot_id("Onyx", "Geometry"), "bean:onyx:geometry");
        assert_eq!(roast_batch_id("Onyx", "Geometry", "Light"), "roast:onyx:geometry:light");
        assert_eq!(brewer_id("Hario", "V60 02"), "brewer:hario:v60-02");
        assert_eq!(session_id("B-001"), "brew:b-001");
        assert_eq!(evaluation_id("B-001"), "eval:b-001");
        assert_eq!(note_id("Stone Fruit"), "note:stone-fruit");
    }

    #[test]
    fn bean_lot_depends_on_full_key() {
        assert_ne!(bean_lot_id("Onyx", "Geometry"), bean_lot_id("Counter Culture", "Geometry"));
        assert_ne!(bean_lot_id("Onyx", "Geometry"), bean_lot_id("Onyx", "Southern Weather"));
    }

    #[test]
    fn brewer_components_do_not_bleed_into_each_other() {
        assert_ne!(brewer_id("a-b", "c"), brewer_id("a", "b-c"));
    }

    #[test]
    fn empty_components_use_sentinel() {
        assert_eq!(grinder_id(""), "grinder:unknown");
    }
}
