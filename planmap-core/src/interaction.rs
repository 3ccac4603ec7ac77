//! Region interaction layer: hover, selection, pointer tracking and the
//! styles and tooltip derived from them.
//!
//! Hit-testing itself is left to the renderer; the layer is told which region
//! a pointer event landed on by id and resolves it against the [`RegionSet`].

use crate::config::{Palette, TooltipConfig};
use crate::geometry::ScreenPoint;
use crate::region::{Region, RegionEntry, RegionSet};

/// Outline sweep started on hover entry. Rendered as a dash pattern whose
/// offset runs from `draw_length` down to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineAnimation {
    pub region_id: String,
    pub draw_length: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered_region_id: Option<String>,
    pub selected_region_id: Option<String>,
    /// Last pointer position, container-relative.
    pub pointer_position: Option<ScreenPoint>,
    pub outline: Option<OutlineAnimation>,
}

/// Notification for the embedding application, returned by the handler that
/// caused it so the caller can dispatch after updating its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaEvent {
    Hovered(Region),
    Clicked(Region),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl Tooltip {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            text: String::new(),
            x: 0.0,
            y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutlineStyle {
    None,
    /// Solid outline for the selected region.
    Static,
    /// Animated sweep for the hovered region.
    Animated { draw_length: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub outline: OutlineStyle,
}

/// Style of one region given the current state.
///
/// Hover takes precedence over selection; a region that is neither falls back
/// to its own colors, or transparent with no outline.
pub fn derive_style(entry: &RegionEntry, state: &InteractionState, palette: &Palette) -> RegionStyle {
    let id = entry.region.id.as_str();
    let hovered = state.hovered_region_id.as_deref() == Some(id);
    let selected = state.selected_region_id.as_deref() == Some(id);

    if hovered {
        let draw_length = state
            .outline
            .as_ref()
            .filter(|outline| outline.region_id == id)
            .map_or(entry.perimeter, |outline| outline.draw_length);
        RegionStyle {
            fill: palette.hover_fill.clone(),
            stroke: palette.hover_stroke.clone(),
            stroke_width: palette.hover_stroke_width,
            outline: OutlineStyle::Animated { draw_length },
        }
    } else if selected {
        RegionStyle {
            fill: palette.select_fill.clone(),
            stroke: palette.select_stroke.clone(),
            stroke_width: palette.select_stroke_width,
            outline: OutlineStyle::Static,
        }
    } else {
        // Idle: the region's own style hints, if any
        let region = &entry.region;
        RegionStyle {
            fill: region.fill_color.clone().unwrap_or_else(|| "transparent".to_string()),
            stroke: region.stroke_color.clone().unwrap_or_else(|| "none".to_string()),
            stroke_width: region.line_width.unwrap_or(0.0),
            outline: OutlineStyle::None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionLayer {
    regions: RegionSet,
    state: InteractionState,
    tooltip: TooltipConfig,
    palette: Palette,
}

impl InteractionLayer {
    pub fn new(regions: RegionSet, tooltip: TooltipConfig, palette: Palette) -> Self {
        Self {
            regions,
            state: InteractionState::default(),
            tooltip,
            palette,
        }
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pointer entered a region shape. Unknown ids are ignored.
    pub fn pointer_enter(&mut self, region_id: &str, position: ScreenPoint) -> Option<AreaEvent> {
        let Some(entry) = self.regions.get(region_id) else {
            log::debug!("Pointer entered unknown region `{}`", region_id);
            return None;
        };
        let region = entry.region.clone();

        self.state.hovered_region_id = Some(region.id.clone());
        self.state.pointer_position = Some(position);
        self.state.outline = Some(OutlineAnimation {
            region_id: region.id.clone(),
            draw_length: entry.perimeter,
        });
        Some(AreaEvent::Hovered(region))
    }

    /// Track the pointer for the tooltip; hover and selection are untouched.
    pub fn pointer_move(&mut self, position: ScreenPoint) {
        self.state.pointer_position = Some(position);
    }

    /// Pointer left the hovered region's shape.
    pub fn pointer_leave(&mut self) {
        self.state.hovered_region_id = None;
        self.state.outline = None;
    }

    /// Pointer left the whole viewport.
    pub fn clear_hover(&mut self) {
        self.pointer_leave();
        self.state.pointer_position = None;
    }

    pub fn click(&mut self, region_id: &str, position: ScreenPoint) -> Option<AreaEvent> {
        let region = self.regions.get(region_id)?.region.clone();
        self.state.selected_region_id = Some(region.id.clone());
        self.state.pointer_position = Some(position);
        Some(AreaEvent::Clicked(region))
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_region_id = None;
    }

    pub fn hovered_region(&self) -> Option<&Region> {
        self.lookup(self.state.hovered_region_id.as_deref())
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.lookup(self.state.selected_region_id.as_deref())
    }

    pub fn tooltip(&self) -> Tooltip {
        match (self.hovered_region(), self.state.pointer_position) {
            (Some(region), Some(position)) => Tooltip {
                visible: true,
                text: region.tooltip_text().to_string(),
                x: position.x() + self.tooltip.offset_x,
                y: position.y() + self.tooltip.offset_y,
            },
            _ => Tooltip::hidden(),
        }
    }

    /// Style for the region with `region_id`, `None` for unknown ids.
    pub fn style_for(&self, region_id: &str) -> Option<RegionStyle> {
        self.regions
            .get(region_id)
            .map(|entry| derive_style(entry, &self.state, &self.palette))
    }

    fn lookup(&self, id: Option<&str>) -> Option<&Region> {
        id.and_then(|id| self.regions.get(id)).map(|entry| &entry.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> InteractionLayer {
        let regions = RegionSet::new(vec![
            Region::polygon("r1", "Lot 1", vec![10.0, 10.0, 50.0, 10.0, 50.0, 50.0, 10.0, 50.0]),
            Region::polygon("r2", "", vec![60.0, 60.0, 90.0, 60.0, 90.0, 90.0]),
        ]);
        InteractionLayer::new(regions, TooltipConfig::default(), Palette::default())
    }

    #[test]
    fn enter_sets_hover_and_outline() {
        let mut layer = layer();
        let event = layer.pointer_enter("r1", ScreenPoint::new(100.0, 100.0));

        assert!(matches!(event, Some(AreaEvent::Hovered(ref r)) if r.id == "r1"));
        assert_eq!(layer.state().hovered_region_id.as_deref(), Some("r1"));
        let outline = layer.state().outline.clone().unwrap();
        assert_eq!(outline.draw_length, 160.0);
    }

    #[test]
    fn enter_unknown_region_is_ignored() {
        let mut layer = layer();
        assert!(layer.pointer_enter("nope", ScreenPoint::new(0.0, 0.0)).is_none());
        assert!(layer.hovered_region().is_none());
    }

    #[test]
    fn move_only_updates_pointer() {
        let mut layer = layer();
        layer.pointer_enter("r1", ScreenPoint::new(1.0, 1.0));
        layer.click("r2", ScreenPoint::new(1.0, 1.0));
        let before = layer.state().clone();

        layer.pointer_move(ScreenPoint::new(5.0, 7.0));
        assert_eq!(layer.state().pointer_position, Some(ScreenPoint::new(5.0, 7.0)));
        assert_eq!(layer.state().hovered_region_id, before.hovered_region_id);
        assert_eq!(layer.state().selected_region_id, before.selected_region_id);
    }

    #[test]
    fn tooltip_follows_pointer_with_offset() {
        let mut layer = layer();
        assert!(!layer.tooltip().visible);

        layer.pointer_enter("r1", ScreenPoint::new(100.0, 200.0));
        layer.pointer_move(ScreenPoint::new(120.0, 210.0));
        let tooltip = layer.tooltip();

        assert!(tooltip.visible);
        assert_eq!(tooltip.text, "Lot 1");
        assert_eq!((tooltip.x, tooltip.y), (130.0, 150.0));
    }

    #[test]
    fn tooltip_falls_back_to_id() {
        let mut layer = layer();
        layer.pointer_enter("r2", ScreenPoint::new(0.0, 0.0));
        assert_eq!(layer.tooltip().text, "r2");
    }

    #[test]
    fn leave_hides_tooltip_and_clears_outline() {
        let mut layer = layer();
        layer.pointer_enter("r1", ScreenPoint::new(0.0, 0.0));
        layer.pointer_leave();

        assert!(layer.hovered_region().is_none());
        assert!(layer.state().outline.is_none());
        assert!(!layer.tooltip().visible);
    }

    #[test]
    fn clear_hover_forgets_pointer() {
        let mut layer = layer();
        layer.pointer_enter("r1", ScreenPoint::new(3.0, 4.0));
        layer.clear_hover();
        assert!(layer.state().pointer_position.is_none());
    }

    #[test]
    fn selection_persists_until_cleared() {
        let mut layer = layer();
        layer.click("r1", ScreenPoint::new(0.0, 0.0));
        layer.pointer_leave();
        assert_eq!(layer.selected_region().map(|r| r.id.as_str()), Some("r1"));

        layer.click("r2", ScreenPoint::new(0.0, 0.0));
        assert_eq!(layer.selected_region().map(|r| r.id.as_str()), Some("r2"));

        layer.clear_selection();
        assert!(layer.selected_region().is_none());
    }

    #[test]
    fn styles_follow_state() {
        let mut layer = layer();
        let palette = Palette::default();

        let idle = layer.style_for("r1").unwrap();
        assert_eq!(idle.fill, "transparent");
        assert_eq!(idle.outline, OutlineStyle::None);

        layer.click("r1", ScreenPoint::new(0.0, 0.0));
        let selected = layer.style_for("r1").unwrap();
        assert_eq!(selected.fill, palette.select_fill);
        assert_eq!(selected.outline, OutlineStyle::Static);

        layer.pointer_enter("r1", ScreenPoint::new(0.0, 0.0));
        let hovered = layer.style_for("r1").unwrap();
        assert_eq!(hovered.fill, palette.hover_fill);
        assert_eq!(hovered.outline, OutlineStyle::Animated { draw_length: 160.0 });

        assert!(layer.style_for("missing").is_none());
    }

    #[test]
    fn idle_style_uses_region_hints() {
        let regions = RegionSet::new(vec![Region {
            fill_color: Some("rgba(0, 0, 255, 0.1)".to_string()),
            line_width: Some(1.5),
            ..Region::polygon("tinted", "", vec![0.0, 0.0, 4.0, 0.0, 4.0, 4.0])
        }]);
        let layer = InteractionLayer::new(regions, TooltipConfig::default(), Palette::default());

        let style = layer.style_for("tinted").unwrap();
        assert_eq!(style.fill, "rgba(0, 0, 255, 0.1)");
        assert_eq!(style.stroke, "none");
        assert_eq!(style.stroke_width, 1.5);
    }
}
