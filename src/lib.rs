pub mod accounts;
pub mod drift;
pub mod export;
pub mod insight;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod mockdata;
pub mod state;
pub mod view;
