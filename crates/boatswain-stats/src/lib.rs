//! Statistical utilities for the Boatswain project.
//!
//! This crate provides the small set of tools the agent needs to track its
//! own play quality across runs:
//!
//! - **Descriptive statistics**: Summarize a dataset with min, max, mean,
//!   median, variance, and standard deviation
//! - **Rolling windows**: Bounded history buffers that discard the oldest
//!   entry once full
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`rolling`]: Fixed-capacity rolling history windows
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use boatswain_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Keeping a bounded history
//!
//! ```
//! use boatswain_stats::rolling::RollingWindow;
//!
//! let mut window = RollingWindow::new(3);
//! for score in [10.0, 20.0, 30.0, 40.0] {
//!     window.push(score);
//! }
//! assert_eq!(window.len(), 3);
//! assert_eq!(window.mean(), Some(30.0));
//! ```

pub mod descriptive;
pub mod rolling;
