//! Temperature report rendering
//!
//! Turns a report body into one styled line per reading, framed by a header
//! and a footer. Readings are recomputed from the body on every render; no
//! parsed state is kept between frames.

use tempwatch_display::{ConsoleBackend, ConsoleExt, DisplayError, Style};
use tempwatch_protocol::{readings, SensorReading, LABEL_WIDTH};

use crate::clock::{ticks_to_secs, Tick};

/// Readings above this are Hot
pub const HOT_ABOVE_C: f32 = 80.0;

/// Readings above this are Warm
pub const WARM_ABOVE_C: f32 = 60.0;

/// Severity of one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeverityTier {
    /// At most 60 °C, or no usable value
    Normal,
    /// Above 60 °C, at most 80 °C
    Warm,
    /// Above 80 °C
    Hot,
}

impl SeverityTier {
    /// Classify a temperature
    pub fn classify(celsius: f32) -> Self {
        if celsius > HOT_ABOVE_C {
            SeverityTier::Hot
        } else if celsius > WARM_ABOVE_C {
            SeverityTier::Warm
        } else {
            SeverityTier::Normal
        }
    }

    /// Classify a reading
    ///
    /// Readings without a number, or at or below zero, are unclassified and
    /// styled as Normal.
    pub fn of(reading: &SensorReading) -> Self {
        match reading.celsius {
            Some(c) if c > 0.0 => Self::classify(c),
            _ => SeverityTier::Normal,
        }
    }

    /// Console style for this tier
    pub fn style(self) -> Style {
        match self {
            SeverityTier::Normal => Style::Green,
            SeverityTier::Warm => Style::Yellow,
            SeverityTier::Hot => Style::Red,
        }
    }
}

/// Renders the temperature list screen
#[derive(Debug, Clone, Copy)]
pub struct TemperatureRenderer {
    refresh_interval_ticks: Tick,
}

impl TemperatureRenderer {
    /// Create a renderer whose footer advertises `refresh_interval_ticks`
    pub const fn new(refresh_interval_ticks: Tick) -> Self {
        Self {
            refresh_interval_ticks,
        }
    }

    /// Render a report body
    ///
    /// Returns the number of reading lines written. An empty or missing body
    /// renders a single "no data" line.
    pub fn render<C: ConsoleBackend + ?Sized>(
        &self,
        console: &mut C,
        body: Option<&[u8]>,
    ) -> Result<usize, DisplayError> {
        console.clear()?;
        console.rule('=')?;
        console.line("   PC TEMPERATURES")?;
        console.rule('=')?;
        console.blank()?;

        let body = match body {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                console.line("Error: no data")?;
                return Ok(0);
            }
        };

        let mut count = 0;
        for reading in readings(body) {
            render_reading(console, &reading)?;
            count += 1;
        }

        console.blank()?;
        console.rule('-')?;
        console.write_fmt_line(
            Style::Plain,
            format_args!(
                "Refreshes every ~{} s",
                ticks_to_secs(self.refresh_interval_ticks).max(1)
            ),
        )?;
        console.line("EXIT = quit")?;
        Ok(count)
    }
}

/// Write one reading as `label   value` in its tier's style
fn render_reading<C: ConsoleBackend + ?Sized>(
    console: &mut C,
    reading: &SensorReading,
) -> Result<(), DisplayError> {
    let style = SeverityTier::of(reading).style();
    console.write_fmt_line(
        style,
        format_args!(
            "{:<width$} {}",
            reading.label.as_str(),
            reading.value_text.as_str(),
            width = LABEL_WIDTH
        ),
    )
}
