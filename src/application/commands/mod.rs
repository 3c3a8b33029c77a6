//! Built-in command handlers

pub mod basic;
pub mod sticker;
pub mod weather;

pub use basic::{greeting_reply, GreetingHandler, InfoHandler, MenuHandler, PingHandler};
pub use sticker::StickerHandler;
pub use weather::WeatherHandler;

pub const PONG: &str = "Pong! ⚡";
pub const UNKNOWN_COMMAND: &str = "Command tidak dikenali. 😅";
pub const WEATHER_FAILED: &str = "Maaf, gagal mengambil data cuaca. 😥";
pub const STICKER_USAGE: &str = "Kirim atau reply gambar dengan caption /sticker";
pub const STICKER_FAILED: &str = "Gagal membuat stiker. 😥";
