//! Named image resources
//!
//! Images load asynchronously in the browser; drawing code checks readiness
//! through the renderer surface and falls back to `placeholder_color`.

/// Which story backdrop an image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Phase1,
    Transition,
    Phase2,
}

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    PuddingRun,
    NoodleRun,
    Page,
    ObLow,
    ObMid,
    ObHigh,
    ObLow2,
    ObMid2,
    ObHigh2,
    BgFar,
    BgMid,
    BgFarTransition,
    BgMidTransition,
    BgFar2,
    BgMid2,
    Foreground,
}

impl ImageId {
    pub const ALL: [ImageId; 16] = [
        ImageId::PuddingRun,
        ImageId::NoodleRun,
        ImageId::Page,
        ImageId::ObLow,
        ImageId::ObMid,
        ImageId::ObHigh,
        ImageId::ObLow2,
        ImageId::ObMid2,
        ImageId::ObHigh2,
        ImageId::BgFar,
        ImageId::BgMid,
        ImageId::BgFarTransition,
        ImageId::BgMidTransition,
        ImageId::BgFar2,
        ImageId::BgMid2,
        ImageId::Foreground,
    ];

    /// Site-relative URL
    pub fn path(&self) -> &'static str {
        match self {
            ImageId::PuddingRun => "/assets/images/game/pudding-run.png",
            ImageId::NoodleRun => "/assets/images/game/noodle-run.png",
            ImageId::Page => "/assets/images/game/pages.png",
            ImageId::ObLow => "/assets/images/game/ob-low.png",
            ImageId::ObMid => "/assets/images/game/ob-mid.png",
            ImageId::ObHigh => "/assets/images/game/ob-high.png",
            ImageId::ObLow2 => "/assets/images/game/ob-low-2.png",
            ImageId::ObMid2 => "/assets/images/game/ob-mid-2.png",
            ImageId::ObHigh2 => "/assets/images/game/ob-high-2.png",
            ImageId::BgFar => "/assets/images/game/bg-far.png",
            ImageId::BgMid => "/assets/images/game/bg-mid.png",
            ImageId::BgFarTransition => "/assets/images/game/bg-far-transition.png",
            ImageId::BgMidTransition => "/assets/images/game/bg-mid-transition.png",
            ImageId::BgFar2 => "/assets/images/game/bg-far-2.png",
            ImageId::BgMid2 => "/assets/images/game/bg-mid-2.png",
            ImageId::Foreground => "/assets/images/game/foreground.png",
        }
    }

    /// Solid colour drawn in place of the image until it has loaded
    pub fn placeholder_color(&self) -> &'static str {
        match self {
            ImageId::PuddingRun => "#e91e8c",
            ImageId::NoodleRun => "#f59e0b",
            ImageId::Page => "#fbbf24",
            ImageId::ObLow | ImageId::ObMid | ImageId::ObHigh => "#0f172a",
            ImageId::ObLow2 | ImageId::ObMid2 | ImageId::ObHigh2 => "#3b0764",
            ImageId::BgFar => "#1e293b",
            ImageId::BgMid => "#334155",
            ImageId::BgFarTransition => "#312e81",
            ImageId::BgMidTransition => "#4338ca",
            ImageId::BgFar2 => "#4a044e",
            ImageId::BgMid2 => "#701a75",
            ImageId::Foreground => "#0b1120",
        }
    }

    /// Backdrop theme for background strips, `None` for everything else
    pub fn backdrop(&self) -> Option<Backdrop> {
        match self {
            ImageId::BgFar | ImageId::BgMid => Some(Backdrop::Phase1),
            ImageId::BgFarTransition | ImageId::BgMidTransition => Some(Backdrop::Transition),
            ImageId::BgFar2 | ImageId::BgMid2 => Some(Backdrop::Phase2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = ImageId::ALL.iter().map(|id| id.path()).collect();
        assert_eq!(paths.len(), ImageId::ALL.len());
    }

    #[test]
    fn test_backdrop_themes() {
        assert_eq!(ImageId::BgMid.backdrop(), Some(Backdrop::Phase1));
        assert_eq!(ImageId::BgMidTransition.backdrop(), Some(Backdrop::Transition));
        assert_eq!(ImageId::BgFar2.backdrop(), Some(Backdrop::Phase2));
        assert_eq!(ImageId::Page.backdrop(), None);
    }
}
