// Portfolio display categories.
// Each category owns one tab, one card container, and one count.

/// Display section a repository is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    #[default]
    Web,
    UiUx,
    Graphics,
    Copywriting,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 4] = [
        Category::Web,
        Category::UiUx,
        Category::Graphics,
        Category::Copywriting,
    ];

    /// Stable identifier used for thumbnail lookup and in logs.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::UiUx => "uiux",
            Category::Graphics => "graphics",
            Category::Copywriting => "copywriting",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::UiUx => "UI/UX",
            Category::Graphics => "Graphics",
            Category::Copywriting => "Copywriting",
        }
    }

    /// Position in `ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
