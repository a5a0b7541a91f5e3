// The player profile data model.
//
// Mirrors the JSON schema the scouting prompt instructs the model to emit.
// The model is an uncontrolled upstream, so every numeric field defaults to
// zero when absent and the advisory 0-99 range is never enforced at parse
// time; rendering tolerates whatever survives deserialization.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Citation / career history records
// ---------------------------------------------------------------------------

/// A web reference returned by the search-grounded model call.
///
/// Not guaranteed unique; insertion order is the order the model returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSource {
    pub title: String,
    pub uri: String,
}

/// One senior-career move: season label, destination club, and a free-text
/// fee ("Free", "Loan", or a monetary figure).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferEvent {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub club: String,
    #[serde(default)]
    pub fee: String,
}

/// International career summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InternationalRecord {
    #[serde(default)]
    pub nation: String,
    #[serde(default)]
    pub caps: u32,
    #[serde(default)]
    pub goals: u32,
    /// Active-years label, e.g. "2015-Present".
    #[serde(default)]
    pub years: String,
}

// ---------------------------------------------------------------------------
// Face stats
// ---------------------------------------------------------------------------

/// The six coarse display statistics shown on the front of the card, plus the
/// goalkeeper variants. Outfield players carry PAC/SHO/PAS/DRI/DEF/PHY;
/// goalkeepers carry DIV/HAN/KIC/REF/SPD/POS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceStats {
    #[serde(default)]
    pub pac: u8,
    #[serde(default)]
    pub sho: u8,
    #[serde(default)]
    pub pas: u8,
    #[serde(default)]
    pub dri: u8,
    #[serde(default)]
    pub def: u8,
    #[serde(default)]
    pub phy: u8,

    #[serde(default)]
    pub div: u8,
    #[serde(default)]
    pub han: u8,
    #[serde(default)]
    pub kic: u8,
    #[serde(default, rename = "ref")]
    pub reflexes: u8,
    #[serde(default)]
    pub spd: u8,
    #[serde(default)]
    pub pos: u8,
}

/// A labeled face-stat value, one spoke of the card's radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarAxis {
    pub label: &'static str,
    pub value: u8,
}

impl FaceStats {
    /// The six radar axes appropriate for the given position string.
    /// Goalkeepers get the DIV/HAN/KIC/REF/SPD/POS set; everyone else the
    /// outfield set. Missing values read as zero.
    pub fn axes(&self, position: &str) -> [RadarAxis; 6] {
        if is_goalkeeper(position) {
            [
                RadarAxis { label: "DIV", value: self.div },
                RadarAxis { label: "HAN", value: self.han },
                RadarAxis { label: "KIC", value: self.kic },
                RadarAxis { label: "REF", value: self.reflexes },
                RadarAxis { label: "SPD", value: self.spd },
                RadarAxis { label: "POS", value: self.pos },
            ]
        } else {
            [
                RadarAxis { label: "PAC", value: self.pac },
                RadarAxis { label: "SHO", value: self.sho },
                RadarAxis { label: "PAS", value: self.pas },
                RadarAxis { label: "DRI", value: self.dri },
                RadarAxis { label: "DEF", value: self.def },
                RadarAxis { label: "PHY", value: self.phy },
            ]
        }
    }
}

/// Whether a free-text position string denotes a goalkeeper.
pub fn is_goalkeeper(position: &str) -> bool {
    position.trim().eq_ignore_ascii_case("gk")
}

// ---------------------------------------------------------------------------
// Fine-grained attributes
// ---------------------------------------------------------------------------

/// The 34 fine-grained skill ratings used for the detailed breakdown.
/// Every field defaults to zero so a sparse reply still deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerAttributes {
    // Pace
    pub acceleration: u8,
    pub sprint_speed: u8,
    // Shooting
    pub finishing: u8,
    pub shot_power: u8,
    pub long_shot: u8,
    pub volleys: u8,
    pub penalties: u8,
    pub positioning: u8,
    // Passing
    pub vision: u8,
    pub crossing: u8,
    pub free_kick: u8,
    pub short_passing: u8,
    pub long_passing: u8,
    pub curve: u8,
    // Dribbling
    pub agility: u8,
    pub balance: u8,
    pub reactions: u8,
    pub ball_control: u8,
    pub dribbling: u8,
    pub composure: u8,
    // Defending
    pub interceptions: u8,
    pub heading: u8,
    pub marking: u8,
    pub standing_tackle: u8,
    pub sliding_tackle: u8,
    // Physical
    pub jumping: u8,
    pub stamina: u8,
    pub strength: u8,
    pub aggression: u8,
    // Goalkeeping
    pub gk_diving: u8,
    pub gk_handling: u8,
    pub gk_kicking: u8,
    pub gk_positioning: u8,
    pub gk_reflexes: u8,
}

/// Identifies one of the 34 attributes. Lookups through
/// [`PlayerAttributes::get`] are total: every key maps to a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Acceleration,
    SprintSpeed,
    Finishing,
    ShotPower,
    LongShot,
    Volleys,
    Penalties,
    Positioning,
    Vision,
    Crossing,
    FreeKick,
    ShortPassing,
    LongPassing,
    Curve,
    Agility,
    Balance,
    Reactions,
    BallControl,
    Dribbling,
    Composure,
    Interceptions,
    Heading,
    Marking,
    StandingTackle,
    SlidingTackle,
    Jumping,
    Stamina,
    Strength,
    Aggression,
    GkDiving,
    GkHandling,
    GkKicking,
    GkPositioning,
    GkReflexes,
}

impl AttributeKey {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            AttributeKey::Acceleration => "Acceleration",
            AttributeKey::SprintSpeed => "Sprint Speed",
            AttributeKey::Finishing => "Finishing",
            AttributeKey::ShotPower => "Shot Power",
            AttributeKey::LongShot => "Long Shot",
            AttributeKey::Volleys => "Volleys",
            AttributeKey::Penalties => "Penalties",
            AttributeKey::Positioning => "Positioning",
            AttributeKey::Vision => "Vision",
            AttributeKey::Crossing => "Crossing",
            AttributeKey::FreeKick => "Free Kick",
            AttributeKey::ShortPassing => "Short Passing",
            AttributeKey::LongPassing => "Long Passing",
            AttributeKey::Curve => "Curve",
            AttributeKey::Agility => "Agility",
            AttributeKey::Balance => "Balance",
            AttributeKey::Reactions => "Reactions",
            AttributeKey::BallControl => "Ball Control",
            AttributeKey::Dribbling => "Dribbling",
            AttributeKey::Composure => "Composure",
            AttributeKey::Interceptions => "Interceptions",
            AttributeKey::Heading => "Heading",
            AttributeKey::Marking => "Marking",
            AttributeKey::StandingTackle => "Standing Tackle",
            AttributeKey::SlidingTackle => "Sliding Tackle",
            AttributeKey::Jumping => "Jumping",
            AttributeKey::Stamina => "Stamina",
            AttributeKey::Strength => "Strength",
            AttributeKey::Aggression => "Aggression",
            AttributeKey::GkDiving => "Diving",
            AttributeKey::GkHandling => "Handling",
            AttributeKey::GkKicking => "Kicking",
            AttributeKey::GkPositioning => "Positioning",
            AttributeKey::GkReflexes => "Reflexes",
        }
    }
}

impl PlayerAttributes {
    /// Total lookup: every key resolves to its stored value (absent = 0).
    pub fn get(&self, key: AttributeKey) -> u8 {
        match key {
            AttributeKey::Acceleration => self.acceleration,
            AttributeKey::SprintSpeed => self.sprint_speed,
            AttributeKey::Finishing => self.finishing,
            AttributeKey::ShotPower => self.shot_power,
            AttributeKey::LongShot => self.long_shot,
            AttributeKey::Volleys => self.volleys,
            AttributeKey::Penalties => self.penalties,
            AttributeKey::Positioning => self.positioning,
            AttributeKey::Vision => self.vision,
            AttributeKey::Crossing => self.crossing,
            AttributeKey::FreeKick => self.free_kick,
            AttributeKey::ShortPassing => self.short_passing,
            AttributeKey::LongPassing => self.long_passing,
            AttributeKey::Curve => self.curve,
            AttributeKey::Agility => self.agility,
            AttributeKey::Balance => self.balance,
            AttributeKey::Reactions => self.reactions,
            AttributeKey::BallControl => self.ball_control,
            AttributeKey::Dribbling => self.dribbling,
            AttributeKey::Composure => self.composure,
            AttributeKey::Interceptions => self.interceptions,
            AttributeKey::Heading => self.heading,
            AttributeKey::Marking => self.marking,
            AttributeKey::StandingTackle => self.standing_tackle,
            AttributeKey::SlidingTackle => self.sliding_tackle,
            AttributeKey::Jumping => self.jumping,
            AttributeKey::Stamina => self.stamina,
            AttributeKey::Strength => self.strength,
            AttributeKey::Aggression => self.aggression,
            AttributeKey::GkDiving => self.gk_diving,
            AttributeKey::GkHandling => self.gk_handling,
            AttributeKey::GkKicking => self.gk_kicking,
            AttributeKey::GkPositioning => self.gk_positioning,
            AttributeKey::GkReflexes => self.gk_reflexes,
        }
    }

    /// Rounded mean of a category's member attributes.
    pub fn category_average(&self, category: AttributeCategory) -> u8 {
        let keys = category.keys();
        let sum: u32 = keys.iter().map(|&k| self.get(k) as u32).sum();
        (sum as f64 / keys.len() as f64).round() as u8
    }
}

/// The display grouping of attributes. Each category owns a fixed set of
/// keys; the mapping is enumerated here rather than looked up dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physical,
    Goalkeeping,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 7] = [
        AttributeCategory::Pace,
        AttributeCategory::Shooting,
        AttributeCategory::Passing,
        AttributeCategory::Dribbling,
        AttributeCategory::Defending,
        AttributeCategory::Physical,
        AttributeCategory::Goalkeeping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AttributeCategory::Pace => "Pace",
            AttributeCategory::Shooting => "Shooting",
            AttributeCategory::Passing => "Passing",
            AttributeCategory::Dribbling => "Dribbling",
            AttributeCategory::Defending => "Defending",
            AttributeCategory::Physical => "Physical",
            AttributeCategory::Goalkeeping => "Goalkeeping",
        }
    }

    /// The attribute keys this category contains.
    pub fn keys(self) -> &'static [AttributeKey] {
        match self {
            AttributeCategory::Pace => &[AttributeKey::Acceleration, AttributeKey::SprintSpeed],
            AttributeCategory::Shooting => &[
                AttributeKey::Finishing,
                AttributeKey::ShotPower,
                AttributeKey::LongShot,
                AttributeKey::Volleys,
                AttributeKey::Penalties,
                AttributeKey::Positioning,
            ],
            AttributeCategory::Passing => &[
                AttributeKey::Vision,
                AttributeKey::Crossing,
                AttributeKey::FreeKick,
                AttributeKey::ShortPassing,
                AttributeKey::LongPassing,
                AttributeKey::Curve,
            ],
            AttributeCategory::Dribbling => &[
                AttributeKey::Agility,
                AttributeKey::Balance,
                AttributeKey::Reactions,
                AttributeKey::BallControl,
                AttributeKey::Dribbling,
                AttributeKey::Composure,
            ],
            AttributeCategory::Defending => &[
                AttributeKey::Interceptions,
                AttributeKey::Heading,
                AttributeKey::Marking,
                AttributeKey::StandingTackle,
                AttributeKey::SlidingTackle,
            ],
            AttributeCategory::Physical => &[
                AttributeKey::Jumping,
                AttributeKey::Stamina,
                AttributeKey::Strength,
                AttributeKey::Aggression,
            ],
            AttributeCategory::Goalkeeping => &[
                AttributeKey::GkDiving,
                AttributeKey::GkHandling,
                AttributeKey::GkKicking,
                AttributeKey::GkPositioning,
                AttributeKey::GkReflexes,
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerProfile
// ---------------------------------------------------------------------------

/// The canonical output record of one scouting request.
///
/// Constructed fresh per search; never persisted. `sources` is always
/// populated from grounding metadata by the extractor -- any sources-like
/// field embedded in the model's JSON body is ignored during parsing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProfile {
    pub name: String,
    pub club: String,
    pub league: String,
    pub nation: String,
    pub position: String,
    /// Direct image URL (Wikimedia Commons preferred) or absent when the
    /// model could not validate one.
    pub image: Option<String>,
    pub overall_rating: u8,
    pub face_stats: FaceStats,
    pub attributes: PlayerAttributes,
    pub description: String,
    #[serde(skip_deserializing)]
    pub sources: Vec<CitationSource>,
    pub transfer_history: Vec<TransferEvent>,
    pub international_history: Option<InternationalRecord>,
    pub youth_career: Vec<String>,
}

impl PlayerProfile {
    pub fn is_goalkeeper(&self) -> bool {
        is_goalkeeper(&self.position)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_is_total() {
        let mut attrs = PlayerAttributes::default();
        attrs.finishing = 93;
        attrs.gk_reflexes = 12;

        for category in AttributeCategory::ALL {
            for &key in category.keys() {
                // Every key resolves without panicking.
                let _ = attrs.get(key);
            }
        }
        assert_eq!(attrs.get(AttributeKey::Finishing), 93);
        assert_eq!(attrs.get(AttributeKey::GkReflexes), 12);
        assert_eq!(attrs.get(AttributeKey::Curve), 0, "absent reads as zero");
    }

    #[test]
    fn categories_cover_all_34_attributes_once() {
        let total: usize = AttributeCategory::ALL.iter().map(|c| c.keys().len()).sum();
        assert_eq!(total, 34);

        let mut seen = std::collections::HashSet::new();
        for category in AttributeCategory::ALL {
            for &key in category.keys() {
                assert!(seen.insert(key), "{key:?} appears in two categories");
            }
        }
    }

    #[test]
    fn category_average_rounds() {
        let attrs = PlayerAttributes {
            acceleration: 90,
            sprint_speed: 85,
            ..Default::default()
        };
        // (90 + 85) / 2 = 87.5 -> 88
        assert_eq!(attrs.category_average(AttributeCategory::Pace), 88);
        assert_eq!(attrs.category_average(AttributeCategory::Goalkeeping), 0);
    }

    #[test]
    fn outfield_axes_use_pac_sho_set() {
        let stats = FaceStats {
            pac: 91,
            sho: 88,
            ..Default::default()
        };
        let axes = stats.axes("ST");
        assert_eq!(axes[0].label, "PAC");
        assert_eq!(axes[0].value, 91);
        assert_eq!(axes[1].value, 88);
    }

    #[test]
    fn goalkeeper_axes_use_div_han_set() {
        let stats = FaceStats {
            div: 90,
            reflexes: 92,
            ..Default::default()
        };
        let axes = stats.axes("GK");
        assert_eq!(axes[0].label, "DIV");
        assert_eq!(axes[0].value, 90);
        assert_eq!(axes[3].label, "REF");
        assert_eq!(axes[3].value, 92);
    }

    #[test]
    fn goalkeeper_detection_is_case_insensitive() {
        assert!(is_goalkeeper("GK"));
        assert!(is_goalkeeper(" gk "));
        assert!(!is_goalkeeper("ST"));
        assert!(!is_goalkeeper(""));
    }

    #[test]
    fn profile_deserializes_camel_case_fields() {
        let json = r#"{
            "name": "Test Player",
            "club": "Test FC",
            "overallRating": 88,
            "faceStats": { "pac": 90, "sho": 85, "pas": 80, "dri": 88, "def": 40, "phy": 75 },
            "attributes": { "sprintSpeed": 92, "ballControl": 89, "gkDiving": 10 },
            "transferHistory": [
                { "season": "2020-2021", "club": "Test FC", "fee": "€50m" }
            ],
            "internationalHistory": { "nation": "Testland", "caps": 45, "goals": 12, "years": "2018-Present" },
            "youthCareer": ["Academy A"]
        }"#;

        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Test Player");
        assert_eq!(profile.overall_rating, 88);
        assert_eq!(profile.face_stats.pac, 90);
        assert_eq!(profile.attributes.sprint_speed, 92);
        assert_eq!(profile.attributes.ball_control, 89);
        assert_eq!(profile.attributes.gk_diving, 10);
        assert_eq!(profile.transfer_history.len(), 1);
        assert_eq!(profile.transfer_history[0].fee, "\u{20ac}50m");
        let intl = profile.international_history.unwrap();
        assert_eq!(intl.caps, 45);
        assert_eq!(profile.youth_career, vec!["Academy A"]);
    }

    #[test]
    fn profile_tolerates_missing_fields() {
        let profile: PlayerProfile = serde_json::from_str(r#"{ "name": "Sparse" }"#).unwrap();
        assert_eq!(profile.name, "Sparse");
        assert!(profile.club.is_empty());
        assert_eq!(profile.overall_rating, 0);
        assert_eq!(profile.face_stats, FaceStats::default());
        assert!(profile.transfer_history.is_empty());
        assert!(profile.international_history.is_none());
        assert!(profile.image.is_none());
    }

    #[test]
    fn embedded_sources_field_is_never_deserialized() {
        let json = r#"{
            "name": "Test",
            "sources": [{ "title": "Bogus", "uri": "https://bogus.example" }]
        }"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert!(profile.sources.is_empty(), "body sources must be discarded");
    }

    #[test]
    fn face_stats_ref_key_maps_to_reflexes() {
        let stats: FaceStats =
            serde_json::from_str(r#"{ "div": 88, "ref": 93 }"#).unwrap();
        assert_eq!(stats.reflexes, 93);
        assert_eq!(stats.div, 88);
    }
}
