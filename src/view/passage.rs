//! Bundled reading passage for the terminal front end.

/// A titled run of numbered verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Heading, e.g. "Psalm 23".
    pub title: &'static str,
    /// Verse texts, verse 1 first.
    pub verses: &'static [&'static str],
}

/// Text shown in the reading pane, flattened to one line per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    lines: Vec<String>,
}

const PSALM_1: Chapter = Chapter {
    title: "Psalm 1",
    verses: &[
        "Blessed is the man that walketh not in the counsel of the ungodly, nor standeth in the way of sinners, nor sitteth in the seat of the scornful.",
        "But his delight is in the law of the LORD; and in his law doth he meditate day and night.",
        "And he shall be like a tree planted by the rivers of water, that bringeth forth his fruit in his season; his leaf also shall not wither; and whatsoever he doeth shall prosper.",
        "The ungodly are not so: but are like the chaff which the wind driveth away.",
        "Therefore the ungodly shall not stand in the judgment, nor sinners in the congregation of the righteous.",
        "For the LORD knoweth the way of the righteous: but the way of the ungodly shall perish.",
    ],
};

const PSALM_23: Chapter = Chapter {
    title: "Psalm 23",
    verses: &[
        "The LORD is my shepherd; I shall not want.",
        "He maketh me to lie down in green pastures: he leadeth me beside the still waters.",
        "He restoreth my soul: he leadeth me in the paths of righteousness for his name's sake.",
        "Yea, though I walk through the valley of the shadow of death, I will fear no evil: for thou art with me; thy rod and thy staff they comfort me.",
        "Thou preparest a table before me in the presence of mine enemies: thou anointest my head with oil; my cup runneth over.",
        "Surely goodness and mercy shall follow me all the days of my life: and I will dwell in the house of the LORD for ever.",
    ],
};

const PSALM_121: Chapter = Chapter {
    title: "Psalm 121",
    verses: &[
        "I will lift up mine eyes unto the hills, from whence cometh my help.",
        "My help cometh from the LORD, which made heaven and earth.",
        "He will not suffer thy foot to be moved: he that keepeth thee will not slumber.",
        "Behold, he that keepeth Israel shall neither slumber nor sleep.",
        "The LORD is thy keeper: the LORD is thy shade upon thy right hand.",
        "The sun shall not smite thee by day, nor the moon by night.",
        "The LORD shall preserve thee from all evil: he shall preserve thy soul.",
        "The LORD shall preserve thy going out and thy coming in from this time forth, and even for evermore.",
    ],
};

impl Passage {
    /// Build a passage from chapters, one heading line and a blank line per chapter.
    pub fn from_chapters(chapters: &[Chapter]) -> Self {
        let mut lines = Vec::new();
        for chapter in chapters {
            lines.push(chapter.title.to_string());
            lines.push(String::new());
            for (index, verse) in chapter.verses.iter().enumerate() {
                lines.push(format!("{:>3} {}", index + 1, verse));
            }
            lines.push(String::new());
        }
        Self { lines }
    }

    /// The bundled sample passage.
    pub fn sample() -> Self {
        Self::from_chapters(&[PSALM_1, PSALM_23, PSALM_121])
    }

    /// Rows of text.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the passage has no rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Heading of the chapter containing `line`.
    pub fn heading_at(&self, line: usize) -> Option<&str> {
        let end = line.min(self.len().checked_sub(1)?);
        self.lines[..=end]
            .iter()
            .rev()
            .find(|l| Self::is_heading(l))
            .map(String::as_str)
    }

    /// Headings are the only non-empty rows not indented by a verse number.
    pub fn is_heading(line: &str) -> bool {
        !line.is_empty() && !line.starts_with(' ')
    }

    /// Largest first-visible row that still fills a viewport of `height` rows.
    pub fn max_scroll(&self, height: usize) -> usize {
        self.len().saturating_sub(height.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_headings_and_numbered_verses() {
        let passage = Passage::sample();
        assert_eq!(passage.lines()[0], "Psalm 1");
        assert!(passage.lines()[2].starts_with("  1 Blessed is the man"));
        assert!(passage
            .lines()
            .iter()
            .any(|l| l.contains("The LORD is my shepherd")));
    }

    #[test]
    fn line_count_matches_chapters() {
        let passage = Passage::from_chapters(&[PSALM_23]);
        // heading + blank + 6 verses + trailing blank
        assert_eq!(passage.len(), 9);
    }

    #[test]
    fn heading_at_finds_enclosing_chapter() {
        let passage = Passage::sample();
        assert_eq!(passage.heading_at(0), Some("Psalm 1"));
        assert_eq!(passage.heading_at(5), Some("Psalm 1"));
        let psalm_23 = passage
            .lines()
            .iter()
            .position(|l| l == "Psalm 23")
            .expect("Psalm 23 present");
        assert_eq!(passage.heading_at(psalm_23 + 3), Some("Psalm 23"));
        assert_eq!(passage.heading_at(10_000), Some("Psalm 121"));
    }

    #[test]
    fn empty_passage_has_no_heading() {
        let passage = Passage::from_chapters(&[]);
        assert!(passage.is_empty());
        assert_eq!(passage.heading_at(0), None);
    }

    #[test]
    fn max_scroll_saturates() {
        let passage = Passage::from_chapters(&[PSALM_23]);
        assert_eq!(passage.max_scroll(4), 5);
        assert_eq!(passage.max_scroll(100), 0);
        assert_eq!(passage.max_scroll(0), 8);
    }
}
