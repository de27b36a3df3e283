use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveEnum, Iterable};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collections")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub color: CollectionColor,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The fixed palette a collection can be tagged with.
///
/// Stored as its lowercase name, which is also the wire representation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum CollectionColor {
    #[sea_orm(string_value = "sunset")]
    Sunset,
    #[sea_orm(string_value = "poppy")]
    Poppy,
    #[sea_orm(string_value = "rosebud")]
    Rosebud,
    #[sea_orm(string_value = "snowflake")]
    Snowflake,
    #[sea_orm(string_value = "candy")]
    Candy,
    #[sea_orm(string_value = "firtree")]
    Firtree,
    #[sea_orm(string_value = "metal")]
    Metal,
    #[sea_orm(string_value = "powder")]
    Powder,
}

/// Returned when a string does not name a palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a collection color", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for CollectionColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|color| color.to_value() == s)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl fmt::Display for CollectionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_palette_name_parses() {
        for color in CollectionColor::iter() {
            let parsed: CollectionColor = color.to_string().parse().unwrap();
            assert_eq!(parsed, color);
        }
        assert_eq!(CollectionColor::iter().count(), 8);
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        assert_eq!(
            "magenta".parse::<CollectionColor>(),
            Err(UnknownColor("magenta".into()))
        );
        // Names are matched exactly.
        assert!("Sunset".parse::<CollectionColor>().is_err());
    }
}
