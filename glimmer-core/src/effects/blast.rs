//! Blast animation
//!
//! One-shot animation played after a long hold, in three phases:
//!
//! 1. **Charge** - light converges from both ends toward the middle,
//!    brightening as it goes, over the previous frame fading out.
//! 2. **Flash** - the tip strobes between white and the current hue.
//! 3. **Glitter** - random single-frame sparks around the tip.
//!
//! The animation is a state machine advanced one discrete step at a time.
//! Each step renders at most one frame and returns the pause to hold
//! before the next one. [`Blast::play`] runs every step back to back with
//! a blocking delay; the scheduler can also interleave steps with its own
//! ticks.

use embedded_hal::delay::DelayNs;

use crate::color::{Hsv, Rgb};
use crate::config::BlastConfig;
use crate::pixels::PixelBuffer;
use crate::traits::{PixelOutput, RandomSource};

/// Steps in the flash phase
pub const FLASH_STEPS: usize = 9;

/// Steps in the glitter phase
pub const GLITTER_STEPS: usize = 40;

/// First pixel of the strobing tip window
pub const TIP_START: usize = 3;

/// Width of the strobing tip window
pub const TIP_WIDTH: usize = 4;

/// Starting value of the charge ramp
const CHARGE_BASE_VALUE: u8 = 125;

/// Current position in the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlastPhase {
    Charge { step: usize },
    Flash { step: usize },
    Glitter { step: usize },
    Finished,
}

/// Totals of a completed playback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlastSummary {
    /// Frames rendered
    pub frames: u32,
    /// Sum of all pauses (ms)
    pub paused_ms: u32,
}

/// Blast state machine
#[derive(Debug, Clone)]
pub struct Blast {
    config: BlastConfig,
    phase: BlastPhase,
}

impl Blast {
    /// Create a blast positioned before its first charge step
    pub fn new(config: BlastConfig) -> Self {
        Self {
            config,
            phase: BlastPhase::Charge { step: 0 },
        }
    }

    /// Current phase
    pub fn phase(&self) -> BlastPhase {
        self.phase
    }

    /// Check if every step has run and the buffer was cleared
    pub fn is_finished(&self) -> bool {
        self.phase == BlastPhase::Finished
    }

    /// Run the next step
    ///
    /// Returns the pause (ms) to hold before the next step, or `None` once
    /// the animation is over. The call that returns `None` leaves the whole
    /// buffer black.
    pub fn step<const N: usize, R, O>(
        &mut self,
        pixels: &mut PixelBuffer<N>,
        hue: u8,
        rng: &mut R,
        output: &mut O,
    ) -> Option<u32>
    where
        R: RandomSource,
        O: PixelOutput,
    {
        let short_pause = self.config.step_ms / 3;

        loop {
            match self.phase {
                BlastPhase::Charge { step } => {
                    let half = N / 2;
                    if step >= half {
                        self.phase = BlastPhase::Flash { step: 0 };
                        continue;
                    }

                    pixels.fade_to_black_by(self.config.fade_by);
                    let ramp = (255 * step / half) as u8;
                    let color: Rgb = Hsv::new(hue, 255, CHARGE_BASE_VALUE + ramp / 2).into();
                    pixels.set(step, color);
                    pixels.set(N - 1 - step, color);
                    output.render(pixels.as_slice());

                    self.phase = BlastPhase::Charge { step: step + 1 };
                    return Some(self.config.step_ms);
                }
                BlastPhase::Flash { step } => {
                    if step >= FLASH_STEPS {
                        self.phase = BlastPhase::Glitter { step: 0 };
                        continue;
                    }

                    pixels.fade_to_black_by(self.config.fade_by);
                    let color = if step % 2 == 1 {
                        Rgb::WHITE
                    } else {
                        Hsv::new(hue, 255, 255).into()
                    };
                    pixels.fill_range(TIP_START..TIP_START + TIP_WIDTH, color);
                    output.render(pixels.as_slice());

                    self.phase = BlastPhase::Flash { step: step + 1 };
                    return Some(short_pause);
                }
                BlastPhase::Glitter { step } => {
                    if step >= GLITTER_STEPS {
                        pixels.clear();
                        self.phase = BlastPhase::Finished;
                        return None;
                    }

                    // Sparks stay off both ends of the strip
                    if N > 2 && rng.chance(self.config.chance) {
                        let index = 1 + rng.random_below((N - 2) as u16) as usize;
                        pixels.set(index, Hsv::new(hue, 255, self.config.glitter_value).into());
                        output.render(pixels.as_slice());
                        pixels.set(index, Rgb::BLACK);
                    }

                    self.phase = BlastPhase::Glitter { step: step + 1 };
                    return Some(short_pause);
                }
                BlastPhase::Finished => return None,
            }
        }
    }

    /// Run every remaining step, pausing with `delay` in between
    pub fn play<const N: usize, R, O, D>(
        &mut self,
        pixels: &mut PixelBuffer<N>,
        hue: u8,
        rng: &mut R,
        output: &mut O,
        delay: &mut D,
    ) -> BlastSummary
    where
        R: RandomSource,
        O: PixelOutput,
        D: DelayNs,
    {
        let mut summary = BlastSummary::default();
        let mut counter = FrameCounter {
            inner: output,
            frames: 0,
        };

        while let Some(pause_ms) = self.step(pixels, hue, rng, &mut counter) {
            delay.delay_ms(pause_ms);
            summary.paused_ms = summary.paused_ms.saturating_add(pause_ms);
        }

        summary.frames = counter.frames;
        summary
    }
}

/// Output wrapper counting rendered frames
struct FrameCounter<'a, O> {
    inner: &'a mut O,
    frames: u32,
}

impl<O: PixelOutput> PixelOutput for FrameCounter<'_, O> {
    fn render(&mut self, pixels: &[Rgb]) {
        self.frames += 1;
        self.inner.render(pixels);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.inner.set_brightness(brightness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FixedRng, RecordingOutput, SimDelay, SimTime, XorShiftRng};
    use proptest::prelude::*;

    fn play_default(rng: &mut impl RandomSource) -> (PixelBuffer<10>, RecordingOutput, SimDelay, BlastSummary) {
        let mut pixels = PixelBuffer::new();
        let mut output = RecordingOutput::new();
        let mut delay = SimDelay::new(SimTime::new());
        let summary =
            Blast::new(BlastConfig::default()).play(&mut pixels, 0, rng, &mut output, &mut delay);
        (pixels, output, delay, summary)
    }

    #[test]
    fn test_frame_count_without_sparks() {
        let (pixels, output, _, summary) = play_default(&mut FixedRng::never());
        assert_eq!(output.frames.len(), 5 + 9);
        assert_eq!(summary.frames, 14);
        assert!(pixels.is_dark());
    }

    #[test]
    fn test_frame_count_with_every_spark() {
        let (pixels, output, _, summary) = play_default(&mut FixedRng::always(3));
        assert_eq!(output.frames.len(), 5 + 9 + 40);
        assert_eq!(summary.frames, 54);
        assert!(pixels.is_dark());
    }

    #[test]
    fn test_pause_schedule() {
        let (_, _, delay, summary) = play_default(&mut FixedRng::never());

        let mut expected = vec![40u32; 5];
        expected.extend(core::iter::repeat(13).take(9 + 40));
        assert_eq!(delay.pauses_ms, expected);
        assert_eq!(summary.paused_ms, 5 * 40 + 49 * 13);
        assert_eq!(delay.time.now_ms(), 837);
    }

    #[test]
    fn test_charge_converges_and_brightens() {
        let (_, output, _, _) = play_default(&mut FixedRng::never());

        for (i, frame) in output.frames.iter().take(5).enumerate() {
            let expected: Rgb = Hsv::new(0, 255, 125 + (255 * i / 5) as u8 / 2).into();
            assert_eq!(frame[i], expected, "step {}", i);
            assert_eq!(frame[9 - i], expected, "step {}", i);
        }

        // Last charge frame: outer pixels faded, inner pair brightest
        let last = &output.frames[4];
        assert!(last[0].r < last[4].r);
        assert_eq!(last[4], last[5]);
    }

    #[test]
    fn test_flash_alternates_tip_color() {
        let (_, output, _, _) = play_default(&mut FixedRng::never());
        let hue_color: Rgb = Hsv::new(0, 255, 255).into();

        for step in 0..9 {
            let frame = &output.frames[5 + step];
            let expected = if step % 2 == 1 { Rgb::WHITE } else { hue_color };
            for pixel in &frame[3..7] {
                assert_eq!(*pixel, expected, "flash step {}", step);
            }
        }
    }

    #[test]
    fn test_sparks_stay_inside_and_do_not_accumulate() {
        let (_, output, _, _) = play_default(&mut FixedRng::always(200));

        for frame in &output.frames[14..] {
            let lit: Vec<usize> = (0..10).filter(|&i| !frame[i].is_black()).collect();
            // The tip keeps its last flash color; the spark is clamped to pixel 8
            assert_eq!(lit, vec![3, 4, 5, 6, 8]);
        }
        let spark = &output.frames[53];
        assert_eq!(spark[8], Rgb::from(Hsv::new(0, 255, 80)));
        assert_eq!(spark[7], Rgb::BLACK);
    }

    #[test]
    fn test_step_after_finish_is_none() {
        let mut blast = Blast::new(BlastConfig::default());
        let mut pixels: PixelBuffer<10> = PixelBuffer::new();
        let mut output = RecordingOutput::new();
        let mut rng = FixedRng::never();

        let mut steps = 0;
        while blast.step(&mut pixels, 0, &mut rng, &mut output).is_some() {
            steps += 1;
        }
        assert_eq!(steps, 5 + 9 + 40);
        assert!(blast.is_finished());
        assert_eq!(blast.step(&mut pixels, 0, &mut rng, &mut output), None);
        assert_eq!(output.frames.len(), 14);
    }

    proptest! {
        #[test]
        fn prop_buffer_dark_after_blast(
            step_ms in 0u32..200,
            fade_by in any::<u8>(),
            hue in any::<u8>(),
            seed in any::<u32>(),
        ) {
            let config = BlastConfig { step_ms, fade_by, ..Default::default() };
            let mut pixels: PixelBuffer<10> = PixelBuffer::new();
            pixels.fill(Rgb::WHITE);
            let mut output = RecordingOutput::new();
            let mut delay = SimDelay::new(SimTime::new());
            let mut rng = XorShiftRng(seed);

            let summary = Blast::new(config).play(&mut pixels, hue, &mut rng, &mut output, &mut delay);

            prop_assert!(pixels.is_dark());
            prop_assert!(summary.frames >= 14 && summary.frames <= 54);
            prop_assert_eq!(summary.frames as usize, output.frames.len());
            prop_assert_eq!(summary.paused_ms, 5 * step_ms + 49 * (step_ms / 3));
        }
    }
}
