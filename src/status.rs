use serde_json::Value;

const DEFAULT_MAX_PLAYERS: i64 = 100;
const DEFAULT_VERSION_NAME: &str = "Unknown";
const FAVICON_PREFIX: &str = "data:image";

/// Section sign introducing a legacy formatting code.
const SECTION_SIGN: char = '§';

/// Legacy formatting codes stripped from the MOTD. Deliberately restricted:
/// the numeric color codes `§0`-`§9` pass through untouched.
const MOTD_FORMAT_CODES: &[char] = &['a', 'b', 'c', 'd', 'e', 'f', 'l', 'o', 'n', 'm', 'k', 'r'];

/// Outcome of one probe attempt. Always fully populated; when `online` is
/// false the remaining fields are placeholders, not observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub online: bool,
    pub players_online: i64,
    pub players_max: i64,
    pub version_name: String,
    pub motd: String,
    pub icon_data_uri: Option<String>,
}

impl ProbeResult {
    pub fn offline() -> Self {
        Self {
            online: false,
            players_online: 0,
            players_max: DEFAULT_MAX_PLAYERS,
            version_name: DEFAULT_VERSION_NAME.to_owned(),
            motd: String::new(),
            icon_data_uri: None,
        }
    }
}

/// `description` is either a bare string or a text component object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    Plain(String),
    Component { text: String },
}

impl Description {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::Plain(text.clone()),
            // Only the top-level `text` field is read; nested `extra`
            // segments are ignored so the MOTD shape stays stable for
            // downstream consumers.
            Some(Value::Object(fields)) => Self::Component {
                text: fields
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
            },
            _ => Self::Plain(String::new()),
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::Component { text } => text,
        }
    }
}

/// Status document fields resolved once, with fixed fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPayload {
    pub players_online: i64,
    pub players_max: i64,
    pub version_name: String,
    pub description: Description,
    pub favicon: Option<String>,
}

impl StatusPayload {
    /// Missing or wrong-typed fields degrade to defaults instead of failing
    /// the probe.
    pub fn from_value(v: &Value) -> Self {
        let players = v.get("players");
        Self {
            players_online: players
                .and_then(|p| p.get("online"))
                .and_then(Value::as_i64)
                .unwrap_or(0),
            players_max: players
                .and_then(|p| p.get("max"))
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_MAX_PLAYERS),
            version_name: v
                .get("version")
                .and_then(|ver| ver.get("name"))
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_VERSION_NAME)
                .to_owned(),
            description: Description::from_value(v.get("description")),
            favicon: v
                .get("favicon")
                .and_then(Value::as_str)
                .filter(|icon| icon.starts_with(FAVICON_PREFIX))
                .map(str::to_owned),
        }
    }
}

/// Parse the status JSON into a populated result.
///
/// Only a syntactically broken document is an error; the caller treats it
/// like any other failed probe.
pub fn parse_status(json: &str) -> Result<ProbeResult, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    let payload = StatusPayload::from_value(&value);

    Ok(ProbeResult {
        online: true,
        players_online: payload.players_online,
        players_max: payload.players_max,
        version_name: payload.version_name,
        motd: sanitize_motd(&payload.description.into_text()),
        icon_data_uri: payload.favicon,
    })
}

/// Strip legacy `§x` formatting codes from a raw MOTD.
pub fn sanitize_motd(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION_SIGN {
            if let Some(code) = chars.peek() {
                if MOTD_FORMAT_CODES.contains(code) {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
