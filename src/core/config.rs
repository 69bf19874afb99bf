use std::fmt;

#[derive(Debug, Clone)]
pub enum PageSize {
    A4,
    A5,
    Letter,
    Custom(f32, f32), // width, height in mm
}

impl PageSize {
    pub fn to_typst(&self) -> String {
        match self {
            PageSize::A4 => "\"a4\"".to_string(),
            PageSize::A5 => "\"a5\"".to_string(),
            PageSize::Letter => "\"us-letter\"".to_string(),
            PageSize::Custom(w, h) => format!("(width: {}mm, height: {}mm)", w, h),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 15.0,
            bottom: 15.0,
            left: 15.0,
            right: 15.0,
        }
    }
}

impl Margin {
    pub fn uniform(size: f32) -> Self {
        Margin {
            top: size,
            bottom: size,
            left: size,
            right: size,
        }
    }

    pub fn to_typst(&self) -> String {
        format!(
            "(top: {}mm, bottom: {}mm, left: {}mm, right: {}mm)",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// Page-level setup emitted ahead of every rendered document body.
#[derive(Debug, Clone)]
pub struct PageSetup {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin: Margin,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: Margin::default(),
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
        }
    }
}

impl PageSetup {
    pub fn landscape() -> Self {
        PageSetup {
            orientation: Orientation::Landscape,
            ..Default::default()
        }
    }

    pub fn to_typst_header(&self) -> String {
        format!(
            r#"#set page(
  paper: {},
  margin: {},
  flipped: {}
)
#set text(
  font: "{}",
  size: {}pt
)"#,
            self.page_size.to_typst(),
            self.margin.to_typst(),
            matches!(self.orientation, Orientation::Landscape),
            self.font_family,
            self.font_size,
        )
    }
}
