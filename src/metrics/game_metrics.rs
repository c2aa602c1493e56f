use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames older than this no longer count towards the FPS readout
const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Session statistics shown next to the grid
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    frame_times: VecDeque<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            frame_times: VecDeque::new(),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Note that a frame was drawn at `now`
    pub fn record_frame(&mut self, now: Instant) {
        self.frame_times.push_back(now);
        while let Some(&oldest) = self.frame_times.front() {
            if now.duration_since(oldest) <= FPS_WINDOW {
                break;
            }
            self.frame_times.pop_front();
        }
    }

    /// Frames per second over the last second of recorded frames
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frame_times.front(), self.frame_times.back()) else {
            return 0.0;
        };
        let span = last.duration_since(*first).as_secs_f64();
        if span <= 0.0 {
            return 0.0;
        }
        (self.frame_times.len() - 1) as f64 / span
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_fps_from_frame_times() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.fps(), 0.0);

        let start = Instant::now();
        for i in 0..=30 {
            metrics.record_frame(start + Duration::from_millis(i * 20));
        }
        // 30 intervals of 20ms
        assert!((metrics.fps() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_window_drops_old_frames() {
        let mut metrics = GameMetrics::new();
        let start = Instant::now();

        metrics.record_frame(start);
        metrics.record_frame(start + Duration::from_secs(5));
        metrics.record_frame(start + Duration::from_millis(5500));

        assert!((metrics.fps() - 2.0).abs() < 1e-6);
    }
}
