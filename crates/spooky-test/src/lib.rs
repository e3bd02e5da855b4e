//! Spooky Route server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `spooky_test::` paths, with the in-memory store and scripted geocoder
//! enabled.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use spooky_core::*;
    pub use spooky_service::*;

    pub mod db {
        pub use spooky_db::db::*;
        pub use spooky_db::memory::MemoryStore;
        pub use spooky_db::store::*;
    }

    pub mod model {
        pub use spooky_db::model::*;
    }

    // Provider adapter; `geocode` itself is the service-side search pipeline
    pub mod places {
        pub use spooky_geocode::scripted::*;
        pub use spooky_geocode::*;
    }

    pub mod config {
        pub use spooky_app::config::ConfigHandler;
        pub use spooky_core::config::*;
    }
}

pub mod app {
    pub use spooky_app::*;

    pub mod api {
        pub use spooky_app::app::api::*;
    }
}
