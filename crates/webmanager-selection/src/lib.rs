//! Block selection controller for the Web Manager viewer.
//!
//! This crate turns a rapid stream of user selections into a debounced
//! sequence of fetches and publishes the outcome of the most recent one:
//! - `SelectionController` - owns the debounce timer, the fetch tasks and
//!   the published `ControllerState`
//! - `FetchService` - the capability the controller loads content through
//! - `Navigator` - previous/next/index navigation over a selection list
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webmanager_selection::{SelectionConfig, SelectionController, SimulatedFetchService};
//! use webmanager_models::SelectionSummary;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = Arc::new(SimulatedFetchService::new());
//!     let items = vec![SelectionSummary::new(10, "Field A"), SelectionSummary::new(40, "Field B")];
//!
//!     // The first item is fetched immediately
//!     let controller = SelectionController::start(service, SelectionConfig::default(), items.clone());
//!     let mut states = controller.subscribe_state();
//!
//!     controller.select_item(items[1].clone());
//!
//!     while states.changed().await.is_ok() {
//!         let state = states.borrow().clone();
//!         if !state.is_loading {
//!             println!("{:?}", state.content);
//!             break;
//!         }
//!     }
//!
//!     controller.dispose().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Key Concepts
//!
//! ## Settlement
//!
//! Every `select_item` call restarts the debounce timer. A selection settles
//! once the timer elapses with no newer call, and only settled selections
//! are fetched.
//!
//! ## Generation
//!
//! Each settlement increments a generation counter and tags its fetch with
//! it. A fetch result is published only if its generation is still the
//! latest, so slow results for superseded selections are dropped.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod fetch;
pub mod navigator;
pub mod simulated;
pub mod state;

pub use config::{LoadingDisplay, SelectionConfig};
pub use controller::SelectionController;
pub use error::{Result, SelectionError};
pub use event::SelectionEvent;
pub use fetch::{FetchFailure, FetchService};
pub use navigator::Navigator;
pub use simulated::{SimulatedBlock, SimulatedFetchService};
pub use state::{ControllerState, StateView};
