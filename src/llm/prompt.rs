// The scouting instruction sent with every profile request.
//
// The prompt fully specifies the JSON schema the model must return, the
// source-priority policy (Wikipedia for biography and career history,
// FBRef/Transfermarkt for performance data, SoFIFA/EA FC for rating
// calibration), and the image-sourcing rules. Keeping the whole contract in
// the prompt means the extractor only has to locate and parse one fenced
// JSON payload.

/// Build the full scouting prompt for a player query. The query may carry
/// disambiguating context ("Zidane 2002", "Bellingham Real Madrid"); it is
/// embedded verbatim. Callers must trim and reject empty queries first.
pub fn build_scout_prompt(query: &str) -> String {
    format!(
        "You are a world-class football scout and historian. Generate a comprehensive \
         Ultimate Team style profile for: {query}.\n\
         \n\
         CRITICAL INSTRUCTIONS FOR IMAGE:\n\
         1. SEARCH: Use Google Search to find a visual representation of this player.\n\
         2. PRIORITY: Look for Wikimedia Commons images.\n\
         3. EXTRACTION: If you find a Wikimedia \"File:Name.jpg\" page, you MUST extract \
         the actual source URL (e.g. \"https://upload.wikimedia.org/.../Name.jpg\").\n\
         4. FALLBACK: If no Wikimedia image, try to find a stable URL from a major sports \
         news site (ESPN, Sky, etc.) ending in .jpg or .png.\n\
         5. VALIDATION: The URL must be a direct link to an image file. If unsure, return \
         empty string \"\".\n\
         \n\
         CRITICAL SOURCE INSTRUCTIONS FOR DATA:\n\
         1. History & Bio: Use Wikipedia as the primary source for Youth Career, Transfer \
         History (years, clubs, fees), and International Stats.\n\
         2. Stats: Use FBRef and Transfermarkt for precise performance data (goals/90, \
         assists, defensive actions) to inform attributes.\n\
         3. Ratings: Use SoFIFA or EA FC databases for base rating calibration if available.\n\
         \n\
         DATA REQUIREMENTS:\n\
         - Transfer History: List major senior career moves with Season, Club, and Fee \
         (or \"Free\"/\"Loan\").\n\
         - International: Provide Nation, Total Caps, Total Goals, and Active Years.\n\
         - Youth: List youth academies attended.\n\
         - Attributes: 1-99 scale.\n\
           - Pace (Sprint Speed, Acceleration)\n\
           - Shooting (Finishing, Shot Power, etc.)\n\
           - Passing (Vision, Crossing, etc.)\n\
           - Dribbling (Agility, Balance, etc.)\n\
           - Defending (Interceptions, Tackle)\n\
           - Physical (Strength, Stamina)\n\
         \n\
         SPECIAL GOALKEEPER (GK) INSTRUCTIONS:\n\
         - If the player is a Goalkeeper, set 'position' to 'GK'.\n\
         - Face Stats: Diving (DIV), Handling (HAN), Kicking (KIC), Reflexes (REF), \
         Speed (SPD), Positioning (POS).\n\
         - Attributes: Fill 'gk...' attributes accurately. Set outfield attributes low \
         (10-40) unless known for them (e.g. Ederson's passing).\n\
         \n\
         Return ONLY valid JSON wrapped in markdown code blocks ```json ... ```.\n\
         \n\
         JSON Structure:\n\
         {PROFILE_JSON_SHAPE}"
    )
}

/// The exact object shape the model is asked to emit. Field names match the
/// serde renames on `PlayerProfile`.
const PROFILE_JSON_SHAPE: &str = r#"{
  "name": "Player Name",
  "club": "Club Name",
  "league": "League",
  "nation": "Nation",
  "position": "ST/CM/CB/GK/etc",
  "image": "URL string (https://upload.wikimedia.org/...)",
  "overallRating": Number,
  "faceStats": {
    "pac": Number, "sho": Number, "pas": Number, "dri": Number, "def": Number, "phy": Number,
    "div": Number, "han": Number, "kic": Number, "ref": Number, "spd": Number, "pos": Number
  },
  "attributes": {
    "acceleration": Number, "sprintSpeed": Number,
    "finishing": Number, "shotPower": Number, "longShot": Number, "volleys": Number, "penalties": Number, "positioning": Number,
    "vision": Number, "crossing": Number, "freeKick": Number, "shortPassing": Number, "longPassing": Number, "curve": Number,
    "agility": Number, "balance": Number, "reactions": Number, "ballControl": Number, "dribbling": Number, "composure": Number,
    "interceptions": Number, "heading": Number, "marking": Number, "standingTackle": Number, "slidingTackle": Number,
    "jumping": Number, "stamina": Number, "strength": Number, "aggression": Number,
    "gkDiving": Number, "gkHandling": Number, "gkKicking": Number, "gkPositioning": Number, "gkReflexes": Number
  },
  "description": "Detailed playstyle summary.",
  "transferHistory": [
    { "season": "YYYY-YYYY", "club": "Club Name", "fee": "Fee/Type" }
  ],
  "internationalHistory": {
    "nation": "Country",
    "caps": Number,
    "goals": Number,
    "years": "YYYY-Present or YYYY-YYYY"
  },
  "youthCareer": ["Academy A", "Academy B"]
}"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
