// Path: crates/types/src/app/window.rs
use crate::error::CheckError;
use serde::{Deserialize, Serialize};

/// A fixed-length, height-aligned range of blocks in which one heartbeat is expected.
///
/// Invariant: `start_height % length == 0` and `length > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatWindow {
    /// The first height of the window.
    pub start_height: u64,
    /// The window length in blocks.
    pub length: u64,
}

impl HeartbeatWindow {
    /// The boundary of the window preceding `latest`.
    ///
    /// An unaligned height yields the boundary at or below it; an aligned
    /// height steps back one full window so the still-forming window is never
    /// returned.
    pub fn preceding(latest: u64, length: u64) -> crate::Result<Self> {
        if length == 0 {
            return Err(CheckError::InvalidConfig(
                "window length must be greater than zero".into(),
            ));
        }
        let rem = latest % length;
        let start_height = if rem != 0 {
            latest - rem
        } else {
            latest
                .checked_sub(length)
                .ok_or(CheckError::InsufficientHeight { latest, length })?
        };
        Ok(Self {
            start_height,
            length,
        })
    }

    /// The window immediately before this one, if the chain reaches back that far.
    pub fn previous(&self) -> Option<Self> {
        self.start_height
            .checked_sub(self.length)
            .map(|start_height| Self {
                start_height,
                length: self.length,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unaligned_height_rounds_down() {
        let w = HeartbeatWindow::preceding(123, 50).unwrap();
        assert_eq!(w.start_height, 100);
    }

    #[test]
    fn test_aligned_height_steps_back_one_window() {
        let w = HeartbeatWindow::preceding(150, 50).unwrap();
        assert_eq!(w.start_height, 100);
    }

    #[test]
    fn test_result_is_aligned_and_in_the_past() {
        for length in [1u64, 7, 50, 64] {
            for latest in 1u64..400 {
                let w = HeartbeatWindow::preceding(latest, length).unwrap();
                assert_eq!(w.start_height % length, 0, "latest={latest} length={length}");
                assert!(w.start_height < latest, "latest={latest} length={length}");
            }
        }
    }

    #[test]
    fn test_genesis_has_no_complete_window() {
        let err = HeartbeatWindow::preceding(0, 50).unwrap_err();
        assert!(matches!(
            err,
            CheckError::InsufficientHeight { latest: 0, length: 50 }
        ));
    }

    #[test]
    fn test_zero_length_is_rejected() {
        assert!(matches!(
            HeartbeatWindow::preceding(10, 0),
            Err(CheckError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_previous_stops_at_zero() {
        let w = HeartbeatWindow {
            start_height: 50,
            length: 50,
        };
        let p = w.previous().unwrap();
        assert_eq!(p.start_height, 0);
        assert!(p.previous().is_none());
    }
}
