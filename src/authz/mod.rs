//! Authorization decisions
//!
//! Pure functions consulted by handlers after the auth middleware has
//! resolved an identity: an ownership check gating mutation, and a typed
//! projection pair deciding which character fields a viewer may see.

use crate::db::characters::Character;
use serde::Serialize;

/// Ownership check for mutations: only the owner may act
pub fn can_mutate(actor_user_code: i32, owner_user_code: i32) -> bool {
    actor_user_code == owner_user_code
}

/// Character fields visible to the owning user
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCharacterView {
    pub user_code: i32,
    pub character_name: String,
    pub health: i32,
    pub power: i32,
    pub money: i32,
}

/// Character fields visible to everyone else; `money` is absent, not nulled
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicCharacterView {
    pub user_code: i32,
    pub character_name: String,
    pub health: i32,
    pub power: i32,
}

/// A character as seen by a particular viewer
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CharacterView {
    Owner(OwnerCharacterView),
    Public(PublicCharacterView),
}

/// Project a character record to the field set its viewer may see
pub fn project_character(viewer_user_code: Option<i32>, character: &Character) -> CharacterView {
    match viewer_user_code {
        Some(actor) if actor == character.user_code => CharacterView::Owner(OwnerCharacterView {
            user_code: character.user_code,
            character_name: character.character_name.clone(),
            health: character.health,
            power: character.power,
            money: character.money,
        }),
        _ => CharacterView::Public(PublicCharacterView {
            user_code: character.user_code,
            character_name: character.character_name.clone(),
            health: character.health,
            power: character.power,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character() -> Character {
        Character {
            character_code: 11,
            character_name: "ranger".to_string(),
            user_code: 3,
            health: 500,
            power: 100,
            money: 10000,
        }
    }

    #[test]
    fn test_can_mutate_only_for_owner() {
        assert!(can_mutate(3, 3));
        assert!(!can_mutate(4, 3));
    }

    #[test]
    fn test_owner_sees_money() {
        let view = project_character(Some(3), &character());
        let json = serde_json::to_value(&view).expect("serialize view");
        assert_eq!(json["money"], 10000);
        assert_eq!(json["characterName"], "ranger");
    }

    #[test]
    fn test_non_owner_money_is_absent() {
        let view = project_character(Some(4), &character());
        let json = serde_json::to_value(&view).expect("serialize view");
        assert!(json.get("money").is_none());
        assert_eq!(json["health"], 500);
        assert_eq!(json["power"], 100);
    }

    #[test]
    fn test_anonymous_money_is_absent() {
        let view = project_character(None, &character());
        let json = serde_json::to_value(&view).expect("serialize view");
        assert!(json.get("money").is_none());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let c = character();
        assert_eq!(project_character(Some(3), &c), project_character(Some(3), &c));
        assert_eq!(project_character(None, &c), project_character(None, &c));
    }
}
