/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Default number of background-erasure passes per frame.
pub const DEFAULT_ERASE_CYCLES: usize = 3;

/// Default frame rate of the compiled film (frames per second).
pub const DEFAULT_FRAME_RATE: u32 = 1;

/// Extension of raw frames picked up during discovery.
pub const DEFAULT_INPUT_EXTENSION: &str = "jpg";

/// Extension of cropped frames. PNG keeps the alpha channel.
pub const OUTPUT_EXTENSION: &str = "png";

/// Name of the per-sample output folder.
pub const DEFAULT_OUTPUT_DIR: &str = "Processed";

/// File stem of the timeline file searched next to a sample folder.
pub const DEFAULT_TIMELINE_STEM: &str = "Timeline";

/// Extensions accepted for the timeline file.
pub const TIMELINE_EXTENSIONS: [&str; 3] = ["json", "csv", "txt"];

/// Column names preferred when a JSON timeline holds several columns.
pub const TIMELINE_COLUMN_NAMES: [&str; 4] = ["hours", "Hours", "time", "Time"];

/// Contours enclosing this many square pixels or fewer are background artifacts.
pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 100_000.0;

/// Maximum RGB distance from the estimated background colour that still counts
/// as background for the border-key eraser.
pub const DEFAULT_KEY_TOLERANCE: f32 = 40.0;

/// Width in pixels of the border strip sampled for the background colour.
pub const DEFAULT_BORDER_STRIP_WIDTH: usize = 4;

/// Foreground components smaller than this (pixels) are erased as specks.
pub const DEFAULT_MIN_COMPONENT_AREA: usize = 64;

/// Prefix of the compiled film file name.
pub const VIDEO_NAME_PREFIX: &str = "Ageing";

/// Extension of the compiled film.
pub const VIDEO_EXTENSION: &str = "avi";
