use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("no trigger region was supplied")]
    MissingTriggerRegion,
}
