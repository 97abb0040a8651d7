use crate::assets::decode::prepare_logo;
use crate::assets::fetch::LogoFetcher;
use crate::foundation::core::Raster;
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::spec::model::LogoSpec;
use crate::style::composite::over_patch;

/// Fetch, decode and composite the configured logo over the center of the
/// input. The logo is scaled to fit a square of `size_percent` of the
/// input's smaller dimension, preserving its aspect ratio. No logo in the
/// config skips the stage.
pub(crate) fn overlay_logo(
    input: &Raster,
    spec: Option<&LogoSpec>,
    fetcher: Option<&dyn LogoFetcher>,
) -> QrylicResult<Option<Raster>> {
    let Some(spec) = spec else {
        return Ok(None);
    };
    let Some(fetcher) = fetcher else {
        return Err(QrylicError::stage(
            "logo configured but no fetcher is available",
        ));
    };

    let target = logo_target_px(input.width, input.height, spec.size_percent);
    let bytes = fetcher.fetch(&spec.source)?;
    let logo = prepare_logo(&bytes, target, target)?;

    let mut out = input.clone();
    let x0 = input.width.saturating_sub(logo.width) / 2;
    let y0 = input.height.saturating_sub(logo.height) / 2;
    over_patch(&mut out, &logo, x0, y0);
    Ok(Some(out))
}

/// Side of the square the logo must fit in, at least one pixel.
fn logo_target_px(w: u32, h: u32, size_percent: f64) -> u32 {
    let base = f64::from(w.min(h));
    ((base * size_percent / 100.0).round() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/style/logo.rs"]
mod tests;
