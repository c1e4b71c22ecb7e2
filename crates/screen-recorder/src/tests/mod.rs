mod desktop_sources;
mod error;
mod hotkey;
