mod server;

pub use server::{
    configure,
    run_server,
    AppState,
};
