//! Chart rendering with plotters
//!
//! Charts are drawn as SVG by plotters, then laid out with `usvg` and
//! converted to PDF by `svg2pdf`. Text is shaped with a single bundled font,
//! so the output never depends on the fonts installed on the host.

use crate::analytics::charts::ChartSpec;
use crate::error::{AnalysisError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use svg2pdf::{ConversionOptions, PageOptions};
use usvg::fontdb;

/// Font used for every label, caption and legend entry
const CHART_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const CHART_FONT_FAMILY: &str = "DejaVu Sans";

/// Draws a [`ChartSpec`] into an image file
pub trait ChartRenderer {
    /// File extension of the produced images, without the dot
    fn extension(&self) -> &'static str;

    /// Render `chart` to `path`, replacing any existing file
    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<()>;
}

/// PDF line charts
pub struct PdfRenderer {
    width: u32,
    height: u32,
    options: usvg::Options<'static>,
}

impl PdfRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut fonts = fontdb::Database::new();
        fonts.load_font_data(CHART_FONT.to_vec());
        fonts.set_sans_serif_family(CHART_FONT_FAMILY);

        let options = usvg::Options {
            font_family: CHART_FONT_FAMILY.to_string(),
            fontdb: Arc::new(fonts),
            ..Default::default()
        };

        Self {
            width,
            height,
            options,
        }
    }

    /// Draw `chart` as an SVG document
    pub fn svg(&self, chart: &ChartSpec) -> anyhow::Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            draw_chart(root, chart)?;
        }
        Ok(svg)
    }

    /// Draw `chart` as a single-page PDF document
    pub fn pdf(&self, chart: &ChartSpec) -> anyhow::Result<Vec<u8>> {
        let svg = self.svg(chart)?;
        let tree = usvg::Tree::from_str(&svg, &self.options)?;
        svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
            .map_err(|e| anyhow::anyhow!("PDF conversion failed: {:?}", e))
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl ChartRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, chart: &ChartSpec, path: &Path) -> Result<()> {
        let bytes = self.pdf(chart).map_err(|e| AnalysisError::Render {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &ChartSpec) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let ((x_min, x_max), (y_min, y_max)) = chart.bounds();

    let mut ctx = ChartBuilder::on(&root)
        .caption(
            &chart.title,
            FontDesc::new(FontFamily::SansSerif, 22.0, FontStyle::Normal),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    ctx.configure_mesh()
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .draw()?;

    for (index, series) in chart.series.iter().enumerate() {
        let style = Palette99::pick(index).to_rgba().stroke_width(2);
        ctx.draw_series(LineSeries::new(series.points.iter().copied(), style))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if !chart.series.is_empty() {
        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::charts::Series;

    fn sample_chart() -> ChartSpec {
        ChartSpec {
            file_stem: "total_troops".to_string(),
            title: "total_troops".to_string(),
            x_label: "turn".to_string(),
            y_label: "Count".to_string(),
            series: vec![
                Series {
                    label: "player_0".to_string(),
                    points: vec![(1.0, 10.0), (2.0, 12.0), (3.0, 9.0)],
                },
                Series {
                    label: "player_1".to_string(),
                    points: vec![(1.0, 8.0), (2.0, 6.0), (3.0, 11.0)],
                },
            ],
        }
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "risk-charts-render-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_bundled_font_is_the_only_face() {
        let renderer = PdfRenderer::default();
        let fonts = &renderer.options.fontdb;

        assert_eq!(fonts.len(), 1);
        assert!(fonts
            .faces()
            .all(|face| face.families.iter().any(|(name, _)| name == CHART_FONT_FAMILY)));
    }

    #[test]
    fn test_svg_carries_labels() {
        let svg = PdfRenderer::default().svg(&sample_chart()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("total_troops"));
        assert!(svg.contains("player_1"));
        assert!(svg.contains("Count"));
    }

    #[test]
    fn test_render_pdf() {
        let dir = scratch_dir("pdf");
        let path = dir.join("total_troops.pdf");
        let renderer = PdfRenderer::default();

        assert_eq!(renderer.extension(), "pdf");
        renderer.render(&sample_chart(), &path).unwrap();

        let pdf = fs::read(&path).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.len() > 1000);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_is_reproducible() {
        let dir = scratch_dir("repeat");
        let path = dir.join("chart.pdf");
        let renderer = PdfRenderer::new(640, 480);

        renderer.render(&sample_chart(), &path).unwrap();
        let first = fs::read(&path).unwrap();
        renderer.render(&sample_chart(), &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, PdfRenderer::new(640, 480).pdf(&sample_chart()).unwrap());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_empty_chart() {
        let dir = scratch_dir("empty");
        let path = dir.join("empty.pdf");
        let chart = ChartSpec {
            series: Vec::new(),
            ..sample_chart()
        };

        PdfRenderer::default().render(&chart, &path).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
