mod run;

pub use run::TrackingRun;
