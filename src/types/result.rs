//! Evaluation result

use serde::{Deserialize, Deserializer, Serialize};

/// The four result classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonalityType {
    TetoBoy,
    TetoGirl,
    EgenBoy,
    EgenGirl,
}

impl PersonalityType {
    /// Fixed replacement order used by type-name localisation
    pub const ALL: [PersonalityType; 4] = [
        PersonalityType::TetoBoy,
        PersonalityType::TetoGirl,
        PersonalityType::EgenBoy,
        PersonalityType::EgenGirl,
    ];

    /// Identifier as it appears on the wire and inside result text
    pub fn id(&self) -> &'static str {
        match self {
            PersonalityType::TetoBoy => "teto-boy",
            PersonalityType::TetoGirl => "teto-girl",
            PersonalityType::EgenBoy => "egen-boy",
            PersonalityType::EgenGirl => "egen-girl",
        }
    }

    /// `result.type.{id}`: localised display name
    pub fn name_key(&self) -> String {
        format!("result.type.{}", self.id())
    }

    /// `result.{id}-title`: localised heading
    pub fn title_key(&self) -> String {
        format!("result.{}-title", self.id())
    }

    /// Illustration shipped alongside exported HTML
    pub fn image_path(&self) -> String {
        format!("images/{}.png", self.id())
    }

    /// ANSI accent colour for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            PersonalityType::TetoBoy => "\x1b[34m",  // Blue
            PersonalityType::TetoGirl => "\x1b[35m", // Magenta
            PersonalityType::EgenBoy => "\x1b[36m",  // Cyan
            PersonalityType::EgenGirl => "\x1b[33m", // Yellow
        }
    }
}

impl std::fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result returned by the evaluation endpoint, or decoded from a share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeResult {
    #[serde(rename = "type")]
    pub kind: PersonalityType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub advice: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub love_chain_info: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = r#"{"type":"egen-girl","explanation":"e","advice":"a","love_chain_info":"l"}"#;
        let result: TypeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.kind, PersonalityType::EgenGirl);
        assert_eq!(result.love_chain_info, "l");

        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back["type"], "egen-girl");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type":"mystery","explanation":"","advice":"","love_chain_info":""}"#;
        assert!(serde_json::from_str::<TypeResult>(json).is_err());
    }

    #[test]
    fn test_null_and_missing_text_render_empty() {
        let json = r#"{"type":"teto-girl","explanation":null,"advice":"a"}"#;
        let result: TypeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.explanation, "");
        assert_eq!(result.advice, "a");
        assert_eq!(result.love_chain_info, "");
    }

    #[test]
    fn test_keys() {
        assert_eq!(PersonalityType::TetoBoy.title_key(), "result.teto-boy-title");
        assert_eq!(PersonalityType::EgenBoy.name_key(), "result.type.egen-boy");
    }
}
