use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::ecg::synth::{WaveformSeries, BASELINE, VALUE_MAX, VALUE_MIN};
use crate::error::LookHeartError;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    pub baseline: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        // ECG modal colours: dark panel, rose trace.
        Self {
            width: 900,
            height: 300,
            background: RGBColor(17, 24, 39),
            trace: RGBColor(253, 164, 175),
            baseline: RGBColor(55, 65, 81),
        }
    }
}
/// Render a waveform as a PNG strip with a fixed `[0, 150]` value axis.
///
/// No text is drawn, so no font backend is required.
pub fn render_waveform_png(
    series: &WaveformSeries,
    style: &PlotStyle,
) -> Result<Vec<u8>, LookHeartError> {
    if series.is_empty() {
        return Err(LookHeartError::Plot("waveform has no samples".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = series.len() as f64;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .build_cartesian_2d(0f64..x_max, VALUE_MIN..VALUE_MAX)?;
        chart.draw_series(LineSeries::new(
            [(0.0, BASELINE), (x_max, BASELINE)],
            &style.baseline,
        ))?;
        chart.draw_series(LineSeries::new(
            series.iter().map(|p| (p.index as f64, p.value)),
            ShapeStyle::from(&style.trace).stroke_width(2),
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, LookHeartError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| LookHeartError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
