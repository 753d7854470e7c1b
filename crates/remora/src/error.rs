pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source machine has no child states. Mirroring an unpopulated
    /// hierarchy is a caller-configuration mistake, so this is reported
    /// before the target graph is touched.
    #[error("machine '{machine}' has no child states to mirror")]
    EmptyMachine { machine: String },

    /// A transition names a target that matches neither a mirrored state nor
    /// a mirrored group. The sync aborts; edges already destroyed for the
    /// failing node are not restored, so the target graph should be treated
    /// as re-syncable rather than rolled back.
    #[error("transition target '{target}' in scope '{scope}' matches no mirrored state or group")]
    UnknownTarget { scope: String, target: String },
}
