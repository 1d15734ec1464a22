use std::{fs, path::Path};

use serde::Deserialize;

use crate::{TombError, TombResult, menu::MAX_OPTIONS};

/// Tunables for one game session. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub seed: Option<u64>,

    pub screen_width: i32,
    pub screen_height: i32,
    pub map_width: i32,
    pub map_height: i32,

    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_room_monsters: i32,
    pub max_room_items: i32,
    /// Drop a lettered marker at the center of each accepted room.
    pub room_labels: bool,

    pub fov_radius: i32,
    pub fov_light_walls: bool,

    pub heal_amount: i32,
    pub inventory_capacity: usize,

    pub panel_height: i32,
    pub bar_width: i32,
    pub inventory_width: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            screen_width: 80,
            screen_height: 50,
            map_width: 80,
            map_height: 43,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_room_monsters: 3,
            max_room_items: 20,
            room_labels: true,
            fov_radius: 10,
            fov_light_walls: true,
            heal_amount: 4,
            inventory_capacity: MAX_OPTIONS,
            panel_height: 7,
            bar_width: 20,
            inventory_width: 50,
        }
    }
}

impl GameConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> TombResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> TombResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TombResult<()> {
        if self.room_min_size < 3 || self.room_min_size > self.room_max_size {
            return Err(TombError::InvalidConfig(format!(
                "room sizes {}..={} are not a valid range",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.room_max_size + 1 >= self.map_width || self.room_max_size + 1 >= self.map_height {
            return Err(TombError::InvalidConfig(format!(
                "a {}-wide room does not fit in a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        if self.map_width > self.screen_width
            || self.map_height + self.panel_height > self.screen_height
        {
            return Err(TombError::InvalidConfig(
                "map and panel do not fit on screen".to_string(),
            ));
        }
        if self.inventory_capacity > MAX_OPTIONS {
            return Err(TombError::InvalidConfig(format!(
                "inventory capacity {} exceeds the {MAX_OPTIONS} selectable letters",
                self.inventory_capacity
            )));
        }
        if self.panel_height < 2 || self.bar_width + 2 >= self.screen_width {
            return Err(TombError::InvalidConfig(
                "panel layout leaves no room for messages".to_string(),
            ));
        }
        Ok(())
    }

    /// Width of the message column to the right of the HP bar.
    pub fn message_width(&self) -> usize {
        (self.screen_width - self.bar_width - 2).max(1) as usize
    }

    /// One panel row is reserved for the names-under-mouse line.
    pub fn message_lines(&self) -> usize {
        (self.panel_height - 1).max(1) as usize
    }

    pub fn panel_y(&self) -> i32 {
        self.screen_height - self.panel_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.message_width(), 58);
        assert_eq!(config.message_lines(), 6);
        assert_eq!(config.panel_y(), 43);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "seed": 42, "max_rooms": 5 }"#)
            .expect("valid config");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_rooms, 5);
        assert_eq!(config.fov_radius, 10);
    }

    #[test]
    fn oversized_inventory_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "inventory_capacity": 27 }"#).unwrap_err();
        assert!(matches!(err, TombError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_surfaces_parse_error() {
        let err = GameConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, TombError::Json(_)));
    }
}
