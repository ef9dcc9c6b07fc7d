pub mod client;
pub mod cursor {
    pub mod model;
    pub mod store;
}
pub mod ledger {
    pub mod model;
    pub mod store;
}
