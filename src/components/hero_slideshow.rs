use std::cell::Cell;

use crate::dom::Dom;

/// Round-robin opacity cycling over the hero images.
pub struct HeroSlideshow<N> {
    slides: Vec<N>,
    index: Cell<usize>,
}

impl<N: Clone + PartialEq> HeroSlideshow<N> {
    /// `None` for an empty slide list: there is nothing to cycle.
    pub fn new(slides: Vec<N>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        Some(Self {
            slides,
            index: Cell::new(0),
        })
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn show_first<D: Dom<Node = N>>(&self, dom: &D) {
        self.index.set(0);
        for (i, slide) in self.slides.iter().enumerate() {
            dom.set_style(slide, "opacity", if i == 0 { "1" } else { "0" });
        }
    }

    pub fn advance<D: Dom<Node = N>>(&self, dom: &D) {
        let current = self.index();
        let next = (current + 1) % self.slides.len();
        dom.set_style(&self.slides[current], "opacity", "0");
        dom.set_style(&self.slides[next], "opacity", "1");
        self.index.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeDom;

    #[test]
    fn test_no_slides_no_slideshow() {
        assert!(HeroSlideshow::<usize>::new(Vec::new()).is_none());
    }

    #[test]
    fn test_exactly_one_slide_shown_while_cycling() {
        let dom = FakeDom::new();
        let slides: Vec<_> = (0..3).map(|_| dom.node()).collect();
        let show = HeroSlideshow::new(slides.clone()).unwrap();
        show.show_first(&dom);

        for step in 0..7 {
            let expected = step % 3;
            assert_eq!(show.index(), expected);
            let shown: Vec<_> = slides
                .iter()
                .filter(|s| dom.style(**s, "opacity").as_deref() == Some("1"))
                .collect();
            assert_eq!(shown, vec![&slides[expected]]);
            show.advance(&dom);
        }
    }

    #[test]
    fn test_single_slide_stays_shown() {
        let dom = FakeDom::new();
        let slide = dom.node();
        let show = HeroSlideshow::new(vec![slide]).unwrap();
        show.show_first(&dom);
        show.advance(&dom);
        assert_eq!(show.index(), 0);
        assert_eq!(dom.style(slide, "opacity").as_deref(), Some("1"));
    }
}
