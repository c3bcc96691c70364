//! SVG bar chart rendering

use super::ReportError;
use plotters::prelude::*;
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1200, 600);
pub const CHART_TITLE: &str = "Length of Posts";
pub const X_DESC: &str = "Post Index";
pub const Y_DESC: &str = "Length of Post Body";

/// Render one bar per entry of `heights` at x = 0..n-1 and write the SVG to
/// `path`, replacing any existing file
pub fn render_bar_chart(path: &Path, heights: &[usize]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Plotters rejects empty ranges, so an empty chart keeps a unit-sized grid
    let x_end = heights.len().max(1);
    let max_height = heights.iter().copied().max().unwrap_or(0);
    let y_end = (max_height + max_height / 10).max(1);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0usize..x_end).into_segmented(), 0usize..y_end)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(1)
                .data(heights.iter().enumerate().map(|(index, &height)| (index, height))),
        )
        .map_err(render_error)?;

    root.present().map_err(render_error)?;

    tracing::info!(path = %path.display(), bars = heights.len(), "Chart written");
    Ok(())
}

fn render_error<E: Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_writes_svg() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.svg");

        render_bar_chart(&path, &[2, 1, 4]).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains(X_DESC));
        assert!(svg.contains(Y_DESC));
    }

    #[test]
    fn test_render_empty_series() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.svg");

        render_bar_chart(&path, &[]).unwrap();

        // Background only
        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches("<rect").count(), 1);
    }

    #[test]
    fn test_render_one_bar_per_post() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bars.svg");

        render_bar_chart(&path, &[2, 1, 4]).unwrap();

        // Background plus three bars
        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches("<rect").count(), 4);
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.svg");
        fs::write(&path, "stale contents that are not svg").unwrap();

        render_bar_chart(&path, &[5]).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("stale contents"));
    }

    #[test]
    fn test_render_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports/nested/chart.svg");

        render_bar_chart(&path, &[1, 2]).unwrap();
        assert!(path.exists());
    }
}
