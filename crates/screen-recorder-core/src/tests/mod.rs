mod download;
mod host;
mod session;
mod source;
