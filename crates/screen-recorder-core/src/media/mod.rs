mod devices;
mod stream;
mod track;

pub use {
    devices::MediaDevices,
    stream::{MediaStream, MediaStreamBundle},
    track::{MediaTrack, TrackKind, TrackOrigin},
};
