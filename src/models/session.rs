use crate::error::{ChatError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Only ever sent to the endpoint, never stored.
    System,
    User,
    Assistant,
}

/// An inline `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri(String);

impl DataUri {
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let valid = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .is_some_and(|(mime, _)| mime.contains('/'));
        if valid {
            Ok(Self(uri))
        } else {
            let preview: String = uri.chars().take(32).collect();
            Err(ChatError::Other(format!("Not a base64 data URI: {}", preview)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }
}

impl TryFrom<String> for DataUri {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DataUri> for String {
    fn from(uri: DataUri) -> Self {
        uri.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUrl {
    pub url: DataUri,
}

/// One unit of a message body. Serialized in the OpenAI/OpenRouter
/// multi-part format; the camel-case keys older chat files used are still
/// accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    Image {
        #[serde(alias = "imageUrl")]
        image_url: MediaUrl,
    },
    #[serde(rename = "video_url")]
    Video {
        #[serde(alias = "videoUrl")]
        video_url: MediaUrl,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(uri: DataUri) -> Self {
        ContentPart::Image {
            image_url: MediaUrl { url: uri },
        }
    }

    pub fn video(uri: DataUri) -> Self {
        ContentPart::Video {
            video_url: MediaUrl { url: uri },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Concatenated text of the message, skipping binary parts.
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }
}

/// All stored sessions, in the order they were first written.
///
/// On disk this is a JSON object keyed by session id, so key order is
/// preserved by hand rather than through a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMap {
    sessions: Vec<Session>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a session, replacing any existing session with the same id in place.
    pub fn insert(&mut self, session: Session) {
        match self.get_mut(&session.id) {
            Some(existing) => *existing = session,
            None => self.sessions.push(session),
        }
    }

    /// Returns the session with `id`, creating an empty one at the end if absent.
    pub fn entry(&mut self, id: &str) -> &mut Session {
        let index = match self.sessions.iter().position(|s| s.id == id) {
            Some(index) => index,
            None => {
                self.sessions.push(Session::new(id));
                self.sessions.len() - 1
            }
        };
        &mut self.sessions[index]
    }

    pub fn first(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }
}

impl Serialize for SessionMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sessions.len()))?;
        for session in &self.sessions {
            map.serialize_entry(&session.id, &session.messages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SessionMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SessionMapVisitor;

        impl<'de> Visitor<'de> for SessionMapVisitor {
            type Value = SessionMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of session ids to message arrays")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<SessionMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sessions = SessionMap::new();
                while let Some((id, messages)) = access.next_entry::<String, Vec<Message>>()? {
                    sessions.insert(Session { id, messages });
                }
                Ok(sessions)
            }
        }

        deserializer.deserialize_map(SessionMapVisitor)
    }
}
