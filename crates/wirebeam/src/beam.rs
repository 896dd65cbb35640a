//! The animated beam component.
//!
//! An [`AnimatedBeam`] connects two elements inside a container. Mounting it
//! on a [`Document`] yields a [`MountedBeam`] that keeps its path in sync with
//! layout: it recomputes when the container is resized, when the viewport is
//! resized, and once after a settle delay so late layout is picked up.
//!
//! Moving an endpoint without resizing anything does not trigger a recompute;
//! the path is stale until the next trigger or an explicit
//! [`MountedBeam::refresh`].

use std::{cell::RefCell, rc::Rc, time::Duration};

use log::{debug, trace};

use wirebeam_core::{curve::BeamGeometry, geometry::Size, identifier::Id};

use crate::{
    document::{Document, ObserveTarget},
    layout::LayoutSource,
    subscription::Subscription,
};

/// Animation timing of a beam, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamTiming {
    duration: f32,
    delay: f32,
}

impl BeamTiming {
    pub fn new(duration: f32, delay: f32) -> Self {
        Self { duration, delay }
    }

    /// Length of one dash cycle.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Offset before the first cycle starts.
    pub fn delay(&self) -> f32 {
        self.delay
    }
}

impl Default for BeamTiming {
    fn default() -> Self {
        Self {
            duration: 3.0,
            delay: 0.0,
        }
    }
}

/// The three elements a beam refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamAnchors {
    container: Id,
    from: Id,
    to: Id,
}

impl BeamAnchors {
    pub fn new(container: Id, from: Id, to: Id) -> Self {
        Self {
            container,
            from,
            to,
        }
    }

    pub fn container(&self) -> Id {
        self.container
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }
}

/// The last computed output of a beam.
///
/// Before the first successful computation the path is empty and the
/// container size is zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamState {
    path: String,
    container_size: Size,
    geometry: Option<BeamGeometry>,
}

impl BeamState {
    /// SVG path data, or the empty string if nothing was computed yet.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn container_size(&self) -> Size {
        self.container_size
    }

    pub fn geometry(&self) -> Option<&BeamGeometry> {
        self.geometry.as_ref()
    }

    /// Returns true once a path has been computed.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some()
    }
}

/// A connector between two elements of a container.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use wirebeam::beam::AnimatedBeam;
/// use wirebeam::geometry::Bounds;
/// use wirebeam::identifier::Id;
///
/// let (container, from, to) = (Id::new("row"), Id::new("left"), Id::new("right"));
/// let mut layout = HashMap::new();
/// layout.insert(container, Bounds::from_rect(0.0, 0.0, 800.0, 200.0));
/// layout.insert(from, Bounds::from_rect(40.0, 80.0, 40.0, 40.0));
///
/// let beam = AnimatedBeam::new(container, from, to);
/// assert!(beam.compute(&layout).is_none());
///
/// layout.insert(to, Bounds::from_rect(700.0, 80.0, 40.0, 40.0));
/// let (geometry, size) = beam.compute(&layout).unwrap();
/// assert_eq!(geometry.path_data(), "M 60 100 C 390 100 390 100 720 100");
/// assert_eq!(size.width(), 800.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedBeam {
    anchors: BeamAnchors,
    timing: BeamTiming,
}

impl AnimatedBeam {
    pub fn new(container: Id, from: Id, to: Id) -> Self {
        Self {
            anchors: BeamAnchors::new(container, from, to),
            timing: BeamTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: BeamTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn anchors(&self) -> &BeamAnchors {
        &self.anchors
    }

    pub fn timing(&self) -> BeamTiming {
        self.timing
    }

    /// Computes the beam against the current layout.
    ///
    /// Returns `None` if the container or either endpoint is not mounted.
    pub fn compute<L: LayoutSource + ?Sized>(&self, layout: &L) -> Option<(BeamGeometry, Size)> {
        let container = layout.bounding_rect(self.anchors.container)?;
        let from = layout.bounding_rect(self.anchors.from)?;
        let to = layout.bounding_rect(self.anchors.to)?;

        Some((
            BeamGeometry::from_rects(container, from, to),
            container.to_size(),
        ))
    }

    /// Attaches the beam to `document`.
    ///
    /// Registers an observer on the container, a viewport listener and a
    /// one-shot timer that recomputes after `settle_delay`. Nothing is
    /// computed synchronously; the first path appears on the next frame if
    /// the container is already mounted, or when the settle timer fires.
    pub fn mount(self, document: &Document, settle_delay: Duration) -> MountedBeam {
        let state = Rc::new(RefCell::new(BeamState::default()));

        let on_resize = {
            let state = Rc::clone(&state);
            move |document: &Document| {
                update(&self, &state, document, "resize");
            }
        };
        let on_viewport = {
            let state = Rc::clone(&state);
            move |document: &Document| {
                update(&self, &state, document, "viewport");
            }
        };
        let on_settle = {
            let state = Rc::clone(&state);
            move |document: &Document| {
                update(&self, &state, document, "settle");
            }
        };

        let subscriptions = vec![
            document.observe(ObserveTarget::Element(self.anchors.container), on_resize),
            document.observe(ObserveTarget::Viewport, on_viewport),
            document.set_timeout(settle_delay, on_settle),
        ];

        debug!(
            container = self.anchors.container.to_string(),
            from = self.anchors.from.to_string(),
            to = self.anchors.to.to_string(),
            settle_ms = settle_delay.as_millis() as u64;
            "Beam mounted"
        );

        MountedBeam {
            beam: self,
            state,
            subscriptions,
        }
    }
}

/// Recomputes `beam` into `state`. Leaves `state` untouched if a reference is unmounted.
fn update<L: LayoutSource + ?Sized>(
    beam: &AnimatedBeam,
    state: &RefCell<BeamState>,
    layout: &L,
    trigger: &str,
) -> bool {
    let Some((geometry, container_size)) = beam.compute(layout) else {
        trace!(
            from = beam.anchors.from.to_string(),
            to = beam.anchors.to.to_string(),
            trigger;
            "Beam reference not mounted, keeping previous path"
        );
        return false;
    };

    let path = geometry.path_data();
    debug!(
        from = beam.anchors.from.to_string(),
        to = beam.anchors.to.to_string(),
        trigger,
        path = path.as_str();
        "Beam recomputed"
    );

    let mut state = state.borrow_mut();
    state.path = path;
    state.container_size = container_size;
    state.geometry = Some(geometry);
    true
}

/// A beam attached to a [`Document`]. Dropping it detaches the beam.
#[derive(Debug)]
pub struct MountedBeam {
    beam: AnimatedBeam,
    state: Rc<RefCell<BeamState>>,
    subscriptions: Vec<Subscription>,
}

impl MountedBeam {
    pub fn beam(&self) -> &AnimatedBeam {
        &self.beam
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> BeamState {
        self.state.borrow().clone()
    }

    pub fn path(&self) -> String {
        self.state.borrow().path.clone()
    }

    pub fn container_size(&self) -> Size {
        self.state.borrow().container_size
    }

    /// Recomputes immediately against `layout`. Returns false if a reference is unmounted.
    pub fn refresh<L: LayoutSource + ?Sized>(&self, layout: &L) -> bool {
        update(&self.beam, &self.state, layout, "refresh")
    }

    /// Detaches the beam, cancelling its observers and any pending settle timer.
    ///
    /// Returns the final state.
    pub fn unmount(mut self) -> BeamState {
        self.subscriptions.clear();
        debug!(
            from = self.beam.anchors.from.to_string(),
            to = self.beam.anchors.to.to_string();
            "Beam unmounted"
        );
        self.state.borrow().clone()
    }
}
