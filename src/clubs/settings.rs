//! Club profile patch: `ClubSettingsContract` and the key-name dispatch used
//! by `update_club_profile`.
//!
//! The clubprofile service takes a partial contract plus a `modifiedFields`
//! list naming, in PascalCase, every field the caller meant to touch:
//!
//! ```json
//! { "requestContract": { "chatEnabled": false },
//!   "modifiedFields": ["ChatEnabled"] }
//! ```
//!
//! Callers may hand over loose `(key, value)` pairs. [`SETTING_FIELDS`] maps
//! every recognized snake_case key to a typed setter; keys missing from the
//! table are not errors, they are routed into [`RequestOptions`] instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::models::{ClubJoinability, ClubRole, PreferredColor};
use crate::config::RequestOptions;
use crate::error::{Result, XblError};

/// Partial club profile. Only `Some` fields are serialized.
///
/// Some fields are one-way switches on the service side
/// (`activity_feed_enabled`, `chat_enabled`, `get_recommendation_enabled`,
/// `search_enabled`) and some are read-only (`lfg_enabled`,
/// `is_promoted_club`, `delete_enabled`); the service rejects those writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSettingsContract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date_utc: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_color: Option<PreferredColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_feed_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lfg_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_to_join_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_ownership_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_promoted_club: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_post_to_feed: Option<ClubRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_invite: Option<ClubRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_chat: Option<ClubRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_create_lfg: Option<ClubRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_can_join_lfg: Option<ClubRole>,
    /// Streams marked as mature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mature_content_enabled: Option<bool>,
    /// Only streams of the club's titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_club_titles_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_recommendation_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joinability: Option<ClubJoinability>,
}

type Setter = fn(&mut ClubSettingsContract, Value) -> serde_json::Result<()>;

/// One recognized setting: its snake_case key and a typed setter.
pub struct SettingField {
    pub name: &'static str,
    set: Setter,
}

macro_rules! setting_fields {
    ($($field:ident),* $(,)?) => {
        [$(
            SettingField {
                name: stringify!($field),
                set: |contract, value| {
                    contract.$field = serde_json::from_value(value)?;
                    Ok(())
                },
            },
        )*]
    };
}

/// Every field of [`ClubSettingsContract`], keyed by its snake_case name.
pub static SETTING_FIELDS: [SettingField; 27] = setting_fields![
    description,
    creation_date_utc,
    background_image_url,
    display_image_url,
    preferred_color,
    activity_feed_enabled,
    chat_enabled,
    lfg_enabled,
    preferred_locale,
    request_to_join_enabled,
    leave_enabled,
    transfer_ownership_enabled,
    is_promoted_club,
    tags,
    titles,
    who_can_post_to_feed,
    who_can_invite,
    who_can_chat,
    who_can_create_lfg,
    who_can_join_lfg,
    mature_content_enabled,
    watch_club_titles_only,
    get_recommendation_enabled,
    search_enabled,
    delete_enabled,
    rename_enabled,
    joinability,
];

fn lookup(key: &str) -> Option<&'static SettingField> {
    SETTING_FIELDS.iter().find(|field| field.name == key)
}

/// `snake_case` → `PascalCase`.
pub fn to_pascal(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// A contract patch plus the PascalCase names of the fields it modifies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClubProfileUpdate {
    contract: ClubSettingsContract,
    modified_fields: Vec<String>,
}

impl ClubProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update touching exactly the `Some` fields of `contract`.
    pub fn from_contract(contract: ClubSettingsContract) -> Result<Self> {
        let modified_fields = match serde_json::to_value(&contract)? {
            Value::Object(map) => map
                .keys()
                .map(String::as_str)
                .map(camel_to_pascal)
                .collect(),
            _ => Vec::new(),
        };
        Ok(ClubProfileUpdate {
            contract,
            modified_fields,
        })
    }

    /// Applies one recognized setting.
    ///
    /// Returns `Ok(false)` if `key` is not a contract field. A `null` value
    /// marks the field modified but leaves it out of the contract. A value of
    /// the wrong type is a validation error.
    pub fn set(&mut self, key: &str, value: Value) -> Result<bool> {
        let Some(field) = lookup(key) else {
            return Ok(false);
        };
        (field.set)(&mut self.contract, value)
            .map_err(|e| XblError::validation(format!("invalid value for setting {key}: {e}")))?;
        let pascal = to_pascal(key);
        if !self.modified_fields.contains(&pascal) {
            self.modified_fields.push(pascal);
        }
        Ok(true)
    }

    /// Splits loose settings into a contract patch and transport options.
    pub fn partition<I, K>(settings: I) -> Result<(Self, RequestOptions)>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut update = ClubProfileUpdate::new();
        let mut options = RequestOptions::default();
        for (key, value) in settings {
            let key = key.as_ref();
            if lookup(key).is_some() {
                update.set(key, value)?;
            } else {
                tracing::debug!(key, "setting is not a profile field, passing it to the transport");
                options.absorb(key, value);
            }
        }
        Ok((update, options))
    }

    pub fn contract(&self) -> &ClubSettingsContract {
        &self.contract
    }

    /// PascalCase names, in the order they were first set.
    pub fn modified_fields(&self) -> &[String] {
        &self.modified_fields
    }

    pub fn is_empty(&self) -> bool {
        self.modified_fields.is_empty()
    }

    /// Request body for `POST /clubs/{id}/profile`.
    pub fn to_payload(&self) -> Result<Value> {
        let contract = match serde_json::to_value(&self.contract)? {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(json!({
            "requestContract": contract,
            "modifiedFields": self.modified_fields,
        }))
    }
}

fn camel_to_pascal(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
