//! Persistence for the city core: a JSON snapshot of `City` wrapped in a
//! checksummed LZ4 envelope, the `CityStorage` boundary with in-memory and
//! file-backed adapters, and a plugin that serves save/load requests.

mod atomic_write;
mod exclusive_load;
mod exclusive_save;
pub mod file_header;
pub mod save_error;
mod save_plugin;
pub mod serialization;
pub mod storage;

#[cfg(test)]
mod save_plugin_tests;

pub use save_error::SaveError;
pub use save_plugin::{
    CityLoadFailed, CityLoaded, CitySaved, LoadCityEvent, SaveCityEvent, SavePlugin,
    StorageResource,
};
pub use serialization::{
    decode_city, deserialize_city, encode_city, serialize_city, CitySave, LoadedCity, SAVE_VERSION,
};
pub use storage::{
    Assist, CityStorage, FileStorage, MemoryStorage, Player, PlayerAndFriends, PlayerId,
};
