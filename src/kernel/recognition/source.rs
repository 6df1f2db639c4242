use super::error::EngineError;

/// Capability handle for a continuous streaming recognizer.
///
/// Implementations only issue commands. Everything the engine reports back
/// (`Started`, `Ended`, results, errors) arrives asynchronously as
/// `SpeechEvent`s through the kernel's event channel.
pub trait SpeechSource {
    /// Ask the engine to begin listening. Engines that are already running
    /// report `EngineError::AlreadyStarted`.
    fn start(&mut self) -> Result<(), EngineError>;

    fn stop(&mut self);
}

impl<S: SpeechSource + ?Sized> SpeechSource for Box<S> {
    fn start(&mut self) -> Result<(), EngineError> {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
