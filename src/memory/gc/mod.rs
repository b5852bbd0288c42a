/*!
 * Collection
 * Forced full collections and subscription to collection events
 */

pub mod collector;

pub use collector::{CollectionHandler, HeapCollector};
