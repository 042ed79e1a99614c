pub mod geocoder;
pub mod notifier;
