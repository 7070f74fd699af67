//! Configuration schema definitions.
//!
//! This module declares the complete configuration tree of the limbo server:
//! the typed node structs, their compiled-in defaults and the static field
//! tables that map each field onto the document.
//!
//! Node structs are `#[non_exhaustive]`: outside this crate the only way to
//! obtain one is through its defaults or a loaded document, so a blank
//! nested node is never observable.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use toml::Value;

use crate::config::error::ConfigError;
use crate::config::field::{FieldEntry, FieldKind, NodeSchema};
use crate::config::node::{ConfigNode, NodeReader, NodeWriter};
use crate::config::value::{one_of, ConfigValue, UnknownName};

/// Proxy forwarding protocol trusted by a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardMode {
    /// Players connect directly; nothing is checked.
    None,
    /// BungeeCord ip-forward.
    Legacy,
    /// BungeeGuard token forwarding.
    Guard,
    /// Velocity modern forwarding.
    Modern,
}

impl ForwardMode {
    pub const NAMES: &'static [&'static str] = &["NONE", "LEGACY", "GUARD", "MODERN"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardMode::None => "NONE",
            ForwardMode::Legacy => "LEGACY",
            ForwardMode::Guard => "GUARD",
            ForwardMode::Modern => "MODERN",
        }
    }
}

impl FromStr for ForwardMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(ForwardMode::None),
            "LEGACY" => Ok(ForwardMode::Legacy),
            "GUARD" => Ok(ForwardMode::Guard),
            "MODERN" => Ok(ForwardMode::Modern),
            other => Err(UnknownName {
                name: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigValue for ForwardMode {
    fn expected() -> String {
        one_of(Self::NAMES)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str()?.parse().ok()
    }

    fn to_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

/// Dimension the player is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum World {
    Overworld,
    Nether,
    TheEnd,
}

impl World {
    pub const NAMES: &'static [&'static str] = &["overworld", "nether", "the_end"];

    pub fn as_str(&self) -> &'static str {
        match self {
            World::Overworld => "overworld",
            World::Nether => "nether",
            World::TheEnd => "the_end",
        }
    }
}

impl FromStr for World {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overworld" => Ok(World::Overworld),
            "nether" => Ok(World::Nether),
            "the_end" => Ok(World::TheEnd),
            other => Err(UnknownName {
                name: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigValue for World {
    fn expected() -> String {
        one_of(Self::NAMES)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str()?.parse().ok()
    }

    fn to_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

/// Root configuration.
///
/// The primary listener's keys live at the top of the document; any further
/// listeners are declared as `[[listeners]]` entries.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct LimboConfig {
    /// Listener declared at the document root.
    pub listener: ListenerConfig,

    /// Additional listeners.
    pub listeners: Vec<ListenerConfig>,
}

impl LimboConfig {
    /// The primary listener followed by every additional one.
    pub fn all_listeners(&self) -> impl Iterator<Item = &ListenerConfig> {
        std::iter::once(&self.listener).chain(self.listeners.iter())
    }

    pub fn listener_named(&self, name: &str) -> Option<&ListenerConfig> {
        self.all_listeners().find(|listener| listener.name == name)
    }
}

/// One bound endpoint and the limbo world it serves.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ListenerConfig {
    /// Unique listener name, used in logs and to match listeners across reloads.
    pub name: String,

    pub bind_address: String,

    /// Every port bound on `bind_address`.
    pub bind_ports: Vec<u16>,

    pub debug: bool,

    pub forward_mode: ForwardMode,

    /// Secret for GUARD (`|`-separated tokens) or MODERN (secret file path).
    pub forward_key: String,

    pub world: World,

    pub brand: String,

    pub player_name: String,

    pub disable_fall: bool,

    /// Connection timeout in milliseconds.
    pub timeout: i64,

    /// Keep-alive interval in milliseconds.
    pub delay: i64,

    pub motd: MotdConfig,

    pub position: PositionConfig,

    pub message: JoinMessageConfig,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            bind_address: "0.0.0.0".to_string(),
            bind_ports: vec![25565],
            debug: false,
            forward_mode: ForwardMode::None,
            forward_key: String::new(),
            world: World::Overworld,
            brand: "<light_purple>Blessing</light_purple>".to_string(),
            player_name: "Blessing".to_string(),
            disable_fall: true,
            timeout: 30_000,
            delay: 10_000,
            motd: MotdConfig::default(),
            position: PositionConfig::default(),
            message: JoinMessageConfig::default(),
        }
    }
}

/// Forwarding secret as interpreted for the configured mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardSecret<'a> {
    /// NONE and LEGACY carry no secret.
    Unused,
    /// Accepted BungeeGuard tokens.
    Tokens(Vec<&'a str>),
    /// Path to the Velocity forwarding secret file.
    File(&'a Path),
}

impl ListenerConfig {
    pub fn forward_secret(&self) -> ForwardSecret<'_> {
        match self.forward_mode {
            ForwardMode::None | ForwardMode::Legacy => ForwardSecret::Unused,
            ForwardMode::Guard => ForwardSecret::Tokens(self.forward_key.split('|').collect()),
            ForwardMode::Modern => ForwardSecret::File(Path::new(&self.forward_key)),
        }
    }

    /// `address:port` for every configured port.
    pub fn bind_targets(&self) -> Vec<String> {
        let host = if self.bind_address.contains(':') {
            format!("[{}]", self.bind_address)
        } else {
            self.bind_address.clone()
        };
        self.bind_ports
            .iter()
            .map(|port| format!("{host}:{port}"))
            .collect()
    }
}

/// Server list presentation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct MotdConfig {
    pub description: String,
    pub brand: String,
    /// Hide the player count block entirely.
    pub unknown: bool,
    pub max: i32,
    pub online: i32,
    pub show_brand: bool,
    /// Icon source, prefixed with `[url]`, `[file]` or `[encoded]`. Empty for none.
    pub icon: String,
    pub sample: Vec<String>,
}

impl Default for MotdConfig {
    fn default() -> Self {
        Self {
            description: "<light_purple>Blessing powered - Limbo <3".to_string(),
            brand: "<light_purple>Blessing Powered".to_string(),
            unknown: false,
            max: 0,
            online: 0,
            show_brand: false,
            icon: String::new(),
            sample: vec!["<light_purple>https://github.com/CatMoe/Limbo".to_string()],
        }
    }
}

/// Spawn and join position.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct PositionConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            x: 7.5,
            y: 100.0,
            z: 7.5,
            yaw: 180.0,
            pitch: 0.0,
        }
    }
}

/// Messages sent to a player on join. Empty values disable each feature.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct JoinMessageConfig {
    pub chat: Vec<String>,
    pub action_bar: String,
    pub title: TitleConfig,
    pub tab: TabConfig,
}

impl Default for JoinMessageConfig {
    fn default() -> Self {
        Self {
            chat: Vec::new(),
            action_bar: String::new(),
            title: TitleConfig::default(),
            tab: TabConfig::default(),
        }
    }
}

impl JoinMessageConfig {
    pub fn chat_enabled(&self) -> bool {
        !self.chat.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct TitleConfig {
    pub title: String,
    pub sub_title: String,
    pub fade_in: i32,
    pub stay: i32,
    pub fade_out: i32,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            sub_title: String::new(),
            fade_in: 0,
            stay: 0,
            fade_out: 0,
        }
    }
}

impl TitleConfig {
    /// A title with all timings at zero is not sent.
    pub fn enabled(&self) -> bool {
        self.fade_in != 0 || self.stay != 0 || self.fade_out != 0
    }
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct TabConfig {
    pub header: Vec<String>,
    pub footer: Vec<String>,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            header: Vec::new(),
            footer: Vec::new(),
        }
    }
}

mod root {
    use super::*;

    pub static LISTENER: FieldEntry =
        FieldEntry::new("listener", FieldKind::Flatten(&super::listener::SCHEMA));
    pub static LISTENERS: FieldEntry =
        FieldEntry::new("listeners", FieldKind::NodeList(&super::listener::SCHEMA)).describe(&[
            "Additional listeners. Every key of the top-level listener is accepted,",
            "and missing keys fall back to the same defaults.",
            "",
            "If none of the top-level listener keys are present, the first entry",
            "becomes the top-level listener and the rest stay additional listeners.",
        ]);

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "limbo",
        fields: &[&LISTENER, &LISTENERS],
    };
}

mod listener {
    use super::*;

    pub static NAME: FieldEntry = FieldEntry::new("name", FieldKind::String)
        .describe(&["The name must be unique."])
        .relocated_from(&["listener-name"]);
    pub static BIND_ADDRESS: FieldEntry = FieldEntry::new("bind_address", FieldKind::String)
        .relocated_from(&["bindAddress", "address"]);
    pub static BIND_PORTS: FieldEntry =
        FieldEntry::new("bind_ports", FieldKind::List(&FieldKind::Integer))
            .relocated_from(&["bind-port", "port"]);
    pub static DEBUG: FieldEntry = FieldEntry::new("debug", FieldKind::Bool);
    pub static FORWARD_MODE: FieldEntry =
        FieldEntry::new("forward_mode", FieldKind::Enum(ForwardMode::NAMES))
            .describe(&[
                "This option will check the information coming in from the proxy (to synchronize the IP address of the incoming connection).",
                "And help Limbo reject the target connection that is not from the proxy.",
                "",
                "All forwards that are deemed invalid will use their original kick message.",
                "(example when you using LEGACY: \"If you wish to use IP forwarding, please enable it in your BungeeCord config as well!\")",
                "",
                "NONE: No forwarding will be processed. Players are allowed to connect directly to Limbo.",
                "LEGACY: Classic BungeeCord ip-forward.",
                "GUARD: Handle the forward from BungeeGuard.",
                "MODERN: (Unsupported now) Handle the forward from Velocity.",
            ])
            .relocated_from(&["forwardMode"]);
    pub static FORWARD_KEY: FieldEntry = FieldEntry::new("forward_key", FieldKind::String)
        .describe(&[
            "The key for the MODERN or GUARD forwarding mode.",
            "",
            "GUARD: A string in the form of a key. (You can use \"|\" to separate multiple lines)",
            "MODERN: The path to the \"forwarding.secret\" file. (It can also be called something else)",
        ])
        .relocated_from(&["forwardKey"]);
    pub static WORLD: FieldEntry = FieldEntry::new("world", FieldKind::Enum(World::NAMES))
        .describe(&["overworld, nether, the_end"]);
    pub static BRAND: FieldEntry = FieldEntry::new("brand", FieldKind::String);
    pub static PLAYER_NAME: FieldEntry = FieldEntry::new("player_name", FieldKind::String)
        .relocated_from(&["playerName"]);
    pub static DISABLE_FALL: FieldEntry = FieldEntry::new("disable_fall", FieldKind::Bool)
        .relocated_from(&["disableFall"]);
    pub static TIMEOUT: FieldEntry = FieldEntry::new("timeout", FieldKind::Integer);
    pub static DELAY: FieldEntry = FieldEntry::new("delay", FieldKind::Integer)
        .describe(&["keep-alive delay"]);
    pub static MOTD: FieldEntry = FieldEntry::new("motd", FieldKind::Node(&super::motd::SCHEMA));
    pub static POSITION: FieldEntry =
        FieldEntry::new("position", FieldKind::Node(&super::position::SCHEMA));
    pub static MESSAGE: FieldEntry =
        FieldEntry::new("message", FieldKind::Node(&super::message::SCHEMA));

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "listener",
        fields: &[
            &NAME,
            &BIND_ADDRESS,
            &BIND_PORTS,
            &DEBUG,
            &FORWARD_MODE,
            &FORWARD_KEY,
            &WORLD,
            &BRAND,
            &PLAYER_NAME,
            &DISABLE_FALL,
            &TIMEOUT,
            &DELAY,
            &MOTD,
            &POSITION,
            &MESSAGE,
        ],
    };
}

mod motd {
    use super::*;

    pub static DESCRIPTION: FieldEntry = FieldEntry::new("description", FieldKind::String);
    pub static BRAND: FieldEntry = FieldEntry::new("brand", FieldKind::String);
    pub static UNKNOWN: FieldEntry = FieldEntry::new("unknown", FieldKind::Bool)
        .describe(&["set player info to null."]);
    pub static MAX: FieldEntry = FieldEntry::new("max", FieldKind::Integer);
    pub static ONLINE: FieldEntry = FieldEntry::new("online", FieldKind::Integer);
    pub static SHOW_BRAND: FieldEntry = FieldEntry::new("show_brand", FieldKind::Bool)
        .relocated_from(&["showBrand"]);
    pub static ICON: FieldEntry = FieldEntry::new("icon", FieldKind::String)
        .describe(&[
            "empty to set null. available prefix:",
            "[url] : get png file from url. (example: \"[url]https://example.com\")",
            "[file] : get png file from file. (example: \"[file]server-icon.png\" will read the \"server-icon.png\" file in the directory opened by the shell)",
            "[encoded] : directly encode base64 image. (example: \"[encoded]data:image/png;base64,**content**\")",
        ]);
    pub static SAMPLE: FieldEntry = FieldEntry::new("sample", FieldKind::List(&FieldKind::String));

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "motd",
        fields: &[&DESCRIPTION, &BRAND, &UNKNOWN, &MAX, &ONLINE, &SHOW_BRAND, &ICON, &SAMPLE],
    };
}

mod position {
    use super::*;

    pub static X: FieldEntry = FieldEntry::new("x", FieldKind::Float);
    pub static Y: FieldEntry = FieldEntry::new("y", FieldKind::Float);
    pub static Z: FieldEntry = FieldEntry::new("z", FieldKind::Float);
    pub static YAW: FieldEntry = FieldEntry::new("yaw", FieldKind::Float);
    pub static PITCH: FieldEntry = FieldEntry::new("pitch", FieldKind::Float);

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "position",
        fields: &[&X, &Y, &Z, &YAW, &PITCH],
    };
}

mod message {
    use super::*;

    pub static CHAT: FieldEntry = FieldEntry::new("chat", FieldKind::List(&FieldKind::String))
        .describe(&[
            "Write the chat message for player that joining.",
            "Set to empty to disable this feature.",
        ]);
    pub static ACTION_BAR: FieldEntry = FieldEntry::new("action_bar", FieldKind::String)
        .at("actionBar")
        .describe(&[
            "Write the actionbar message for player that joining.",
            "This feature only works on 1.8+",
            "",
            "Set to empty to disable this feature.",
        ]);
    pub static TITLE: FieldEntry = FieldEntry::new("title", FieldKind::Node(&super::title::SCHEMA))
        .describe(&[
            "Write the title message for player that joining.",
            "This feature only works on 1.8+",
            "",
            "setting the fadeIn, stay, fadeOut to 0 to disable.",
        ]);
    pub static TAB: FieldEntry = FieldEntry::new("tab", FieldKind::Node(&super::tab::SCHEMA))
        .describe(&["Configuration about tab header & footer. (Works on 1.8+)"]);

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "message",
        fields: &[&CHAT, &ACTION_BAR, &TITLE, &TAB],
    };
}

mod title {
    use super::*;

    pub static TITLE: FieldEntry = FieldEntry::new("title", FieldKind::String);
    pub static SUB_TITLE: FieldEntry = FieldEntry::new("sub_title", FieldKind::String)
        .relocated_from(&["subTitle"]);
    pub static FADE_IN: FieldEntry = FieldEntry::new("fade_in", FieldKind::Integer)
        .relocated_from(&["fadeIn"]);
    pub static STAY: FieldEntry = FieldEntry::new("stay", FieldKind::Integer);
    pub static FADE_OUT: FieldEntry = FieldEntry::new("fade_out", FieldKind::Integer)
        .relocated_from(&["fadeOut"]);

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "title",
        fields: &[&TITLE, &SUB_TITLE, &FADE_IN, &STAY, &FADE_OUT],
    };
}

mod tab {
    use super::*;

    pub static HEADER: FieldEntry = FieldEntry::new("header", FieldKind::List(&FieldKind::String));
    pub static FOOTER: FieldEntry = FieldEntry::new("footer", FieldKind::List(&FieldKind::String));

    pub static SCHEMA: NodeSchema = NodeSchema {
        name: "tab",
        fields: &[&HEADER, &FOOTER],
    };
}

impl ConfigNode for LimboConfig {
    fn schema() -> &'static NodeSchema {
        &root::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        // Documents from the list-of-listeners revision have no top-level
        // listener keys; their first entry is the primary listener.
        if !reader.contains_any(ListenerConfig::schema()) {
            let legacy = reader.relocated_element::<ListenerConfig>(&root::LISTENERS, 0)?;
            if let Some(listener) = legacy {
                tracing::info!(
                    "No top-level listener keys, reading primary listener from `listeners`"
                );
                let listeners = reader.nodes(&root::LISTENERS, 1)?;
                return Ok(Self { listener, listeners });
            }
        }

        Ok(Self {
            listener: reader.flatten()?,
            listeners: reader.nodes(&root::LISTENERS, 0)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.flatten(&self.listener);
        writer.nodes(&root::LISTENERS, &self.listeners);
    }
}

impl ConfigNode for ListenerConfig {
    fn schema() -> &'static NodeSchema {
        &listener::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            name: reader.value(&listener::NAME, d.name)?,
            bind_address: reader.value(&listener::BIND_ADDRESS, d.bind_address)?,
            bind_ports: reader.value(&listener::BIND_PORTS, d.bind_ports)?,
            debug: reader.value(&listener::DEBUG, d.debug)?,
            forward_mode: reader.value(&listener::FORWARD_MODE, d.forward_mode)?,
            forward_key: reader.value(&listener::FORWARD_KEY, d.forward_key)?,
            world: reader.value(&listener::WORLD, d.world)?,
            brand: reader.value(&listener::BRAND, d.brand)?,
            player_name: reader.value(&listener::PLAYER_NAME, d.player_name)?,
            disable_fall: reader.value(&listener::DISABLE_FALL, d.disable_fall)?,
            timeout: reader.value(&listener::TIMEOUT, d.timeout)?,
            delay: reader.value(&listener::DELAY, d.delay)?,
            motd: reader.node(&listener::MOTD)?,
            position: reader.node(&listener::POSITION)?,
            message: reader.node(&listener::MESSAGE)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&listener::NAME, &self.name);
        writer.value(&listener::BIND_ADDRESS, &self.bind_address);
        writer.value(&listener::BIND_PORTS, &self.bind_ports);
        writer.value(&listener::DEBUG, &self.debug);
        writer.value(&listener::FORWARD_MODE, &self.forward_mode);
        writer.value(&listener::FORWARD_KEY, &self.forward_key);
        writer.value(&listener::WORLD, &self.world);
        writer.value(&listener::BRAND, &self.brand);
        writer.value(&listener::PLAYER_NAME, &self.player_name);
        writer.value(&listener::DISABLE_FALL, &self.disable_fall);
        writer.value(&listener::TIMEOUT, &self.timeout);
        writer.value(&listener::DELAY, &self.delay);
        writer.node(&listener::MOTD, &self.motd);
        writer.node(&listener::POSITION, &self.position);
        writer.node(&listener::MESSAGE, &self.message);
    }
}

impl ConfigNode for MotdConfig {
    fn schema() -> &'static NodeSchema {
        &motd::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            description: reader.value(&motd::DESCRIPTION, d.description)?,
            brand: reader.value(&motd::BRAND, d.brand)?,
            unknown: reader.value(&motd::UNKNOWN, d.unknown)?,
            max: reader.value(&motd::MAX, d.max)?,
            online: reader.value(&motd::ONLINE, d.online)?,
            show_brand: reader.value(&motd::SHOW_BRAND, d.show_brand)?,
            icon: reader.value(&motd::ICON, d.icon)?,
            sample: reader.value(&motd::SAMPLE, d.sample)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&motd::DESCRIPTION, &self.description);
        writer.value(&motd::BRAND, &self.brand);
        writer.value(&motd::UNKNOWN, &self.unknown);
        writer.value(&motd::MAX, &self.max);
        writer.value(&motd::ONLINE, &self.online);
        writer.value(&motd::SHOW_BRAND, &self.show_brand);
        writer.value(&motd::ICON, &self.icon);
        writer.value(&motd::SAMPLE, &self.sample);
    }
}

impl ConfigNode for PositionConfig {
    fn schema() -> &'static NodeSchema {
        &position::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            x: reader.value(&position::X, d.x)?,
            y: reader.value(&position::Y, d.y)?,
            z: reader.value(&position::Z, d.z)?,
            yaw: reader.value(&position::YAW, d.yaw)?,
            pitch: reader.value(&position::PITCH, d.pitch)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&position::X, &self.x);
        writer.value(&position::Y, &self.y);
        writer.value(&position::Z, &self.z);
        writer.value(&position::YAW, &self.yaw);
        writer.value(&position::PITCH, &self.pitch);
    }
}

impl ConfigNode for JoinMessageConfig {
    fn schema() -> &'static NodeSchema {
        &message::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            chat: reader.value(&message::CHAT, d.chat)?,
            action_bar: reader.value(&message::ACTION_BAR, d.action_bar)?,
            title: reader.node(&message::TITLE)?,
            tab: reader.node(&message::TAB)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&message::CHAT, &self.chat);
        writer.value(&message::ACTION_BAR, &self.action_bar);
        writer.node(&message::TITLE, &self.title);
        writer.node(&message::TAB, &self.tab);
    }
}

impl ConfigNode for TitleConfig {
    fn schema() -> &'static NodeSchema {
        &title::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            title: reader.value(&title::TITLE, d.title)?,
            sub_title: reader.value(&title::SUB_TITLE, d.sub_title)?,
            fade_in: reader.value(&title::FADE_IN, d.fade_in)?,
            stay: reader.value(&title::STAY, d.stay)?,
            fade_out: reader.value(&title::FADE_OUT, d.fade_out)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&title::TITLE, &self.title);
        writer.value(&title::SUB_TITLE, &self.sub_title);
        writer.value(&title::FADE_IN, &self.fade_in);
        writer.value(&title::STAY, &self.stay);
        writer.value(&title::FADE_OUT, &self.fade_out);
    }
}

impl ConfigNode for TabConfig {
    fn schema() -> &'static NodeSchema {
        &tab::SCHEMA
    }

    fn read(reader: &mut NodeReader<'_>) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            header: reader.value(&tab::HEADER, d.header)?,
            footer: reader.value(&tab::FOOTER, d.footer)?,
        })
    }

    fn write(&self, writer: &mut NodeWriter) {
        writer.value(&tab::HEADER, &self.header);
        writer.value(&tab::FOOTER, &self.footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::node::{default_of, from_document, render};
    use crate::config::Document;

    #[test]
    fn test_declared_defaults() {
        let config = default_of::<LimboConfig>();
        let listener = &config.listener;
        assert_eq!(listener.name, "main");
        assert_eq!(listener.bind_address, "0.0.0.0");
        assert_eq!(listener.bind_ports, vec![25565]);
        assert_eq!(listener.forward_mode, ForwardMode::None);
        assert_eq!(listener.world, World::Overworld);
        assert_eq!(listener.timeout, 30_000);
        assert_eq!(listener.delay, 10_000);
        assert!(listener.disable_fall);
        assert!(config.listeners.is_empty());
    }

    #[test]
    fn test_nested_defaults_are_populated() {
        let position = default_of::<PositionConfig>();
        assert_eq!(
            (position.x, position.y, position.z, position.yaw, position.pitch),
            (7.5, 100.0, 7.5, 180.0, 0.0)
        );
        assert_eq!(default_of::<MotdConfig>().sample.len(), 1);
        assert_eq!(default_of::<ListenerConfig>().position, position);
        assert!(!default_of::<JoinMessageConfig>().chat_enabled());
        assert!(!default_of::<TitleConfig>().enabled());
    }

    #[test]
    fn test_enum_names_round_trip() {
        for name in ForwardMode::NAMES {
            let mode: ForwardMode = name.parse().unwrap();
            assert_eq!(mode.as_str(), *name);
        }
        for name in World::NAMES {
            let world: World = name.parse().unwrap();
            assert_eq!(world.to_string(), *name);
        }
        assert!("none".parse::<ForwardMode>().is_err());
    }

    #[test]
    fn test_forward_secret_by_mode() {
        let mut listener = ListenerConfig::default();
        listener.forward_key = "abc|def".into();
        assert_eq!(listener.forward_secret(), ForwardSecret::Unused);

        listener.forward_mode = ForwardMode::Guard;
        assert_eq!(listener.forward_secret(), ForwardSecret::Tokens(vec!["abc", "def"]));

        listener.forward_mode = ForwardMode::Modern;
        listener.forward_key = "forwarding.secret".into();
        assert_eq!(listener.forward_secret(), ForwardSecret::File(Path::new("forwarding.secret")));
    }

    #[test]
    fn test_bind_targets() {
        let mut listener = ListenerConfig::default();
        listener.bind_ports = vec![25565, 25575];
        assert_eq!(listener.bind_targets(), vec!["0.0.0.0:25565", "0.0.0.0:25575"]);

        listener.bind_address = "::".into();
        listener.bind_ports = vec![1];
        assert_eq!(listener.bind_targets(), vec!["[::]:1"]);
    }

    #[test]
    fn test_action_bar_uses_explicit_path() {
        let text = render(&LimboConfig::default());
        assert!(text.contains("[message]"));
        assert!(text.contains("actionBar = \"\""));
        assert!(!text.contains("action-bar"));
    }

    #[test]
    fn test_legacy_listener_list_fills_primary() {
        let doc = Document::parse(
            r#"
            [[listeners]]
            name = "main"
            bindAddress = "127.0.0.1"
            port = 25566

            [[listeners]]
            name = "lobby"
            port = 25567
            "#,
        )
        .unwrap();
        let config: LimboConfig = from_document(&doc).unwrap();
        assert_eq!(config.listener.name, "main");
        assert_eq!(config.listener.bind_address, "127.0.0.1");
        assert_eq!(config.listener.bind_ports, vec![25566]);
        assert_eq!(config.listeners.len(), 1);
        assert_eq!(config.listeners[0].name, "lobby");
        assert_eq!(config.listeners[0].bind_ports, vec![25567]);
        assert_eq!(
            config.listener_named("lobby").map(|l| l.bind_address.as_str()),
            Some("0.0.0.0")
        );
    }

    #[test]
    fn test_listener_entries_alongside_top_level_keys() {
        let doc = Document::parse(
            r#"
            name = "main"
            [[listeners]]
            name = "lobby"
            "#,
        )
        .unwrap();
        let config: LimboConfig = from_document(&doc).unwrap();
        assert_eq!(config.listener.name, "main");
        assert_eq!(config.listeners.len(), 1);
        assert_eq!(config.all_listeners().count(), 2);
    }
}
