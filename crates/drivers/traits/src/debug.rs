//! Debug macros for the video subsystem
//!
//! These macros compile to nothing when debug features are disabled.

/// Debug trace for text screen drivers
#[macro_export]
#[cfg(feature = "debug-video")]
macro_rules! debug_video {
    ($($arg:tt)*) => {
        $crate::__log::debug!(target: "video", $($arg)*)
    };
}

#[macro_export]
#[cfg(not(feature = "debug-video"))]
macro_rules! debug_video {
    ($($arg:tt)*) => {};
}
