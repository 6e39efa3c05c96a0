//! Status watchface
//!
//! Large time in the center, battery icon and percentage in the bottom
//! left corner, date in the bottom right corner.

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    prelude::DrawTarget,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use profont::{PROFONT_14_POINT, PROFONT_24_POINT};

use super::{
    icons::{Icon, IconTable, ICON_SIZE},
    BatteryLabel, DateLabel, Label, TimeLabel, WatchFaceView,
};
use crate::{
    error::Error,
    status::{BatteryIcon, TextColor},
};

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

const MARGIN: i32 = 10;
const STATUS_LINE_Y: i32 = LCD_H as i32 - MARGIN - ICON_SIZE as i32 / 2;

pub const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;
const FOREGROUND_COLOR: Rgb565 = Rgb565::WHITE;

/// Area redrawn for the time label
const TIME_AREA: Rectangle = Rectangle::new(Point::new(0, 95), Size::new(LCD_W, 50));
/// Top left corner of the battery icon
const ICON_POSITION: Point = Point::new(MARGIN, STATUS_LINE_Y - ICON_SIZE as i32 / 2);
/// Area redrawn for the battery label
const BATTERY_AREA: Rectangle = Rectangle::new(
    Point::new(MARGIN + ICON_SIZE as i32 + 4, STATUS_LINE_Y - 12),
    Size::new(60, 24),
);
/// Area redrawn for the date label
const DATE_AREA: Rectangle = Rectangle::new(
    Point::new(LCD_W as i32 / 2, STATUS_LINE_Y - 12),
    Size::new(LCD_W / 2, 24),
);

impl From<TextColor> for Rgb565 {
    fn from(color: TextColor) -> Self {
        match color {
            TextColor::Normal => Rgb565::WHITE,
            TextColor::Alert => Rgb565::RED,
        }
    }
}

#[derive(Debug)]
pub enum FaceError<E> {
    /// Drawing to the display failed
    Draw(E),
    /// Text does not fit into its label
    Label(Error),
}

impl<E> From<Error> for FaceError<E> {
    fn from(error: Error) -> Self {
        FaceError::Label(error)
    }
}

/// Watchface drawn onto an RGB565 draw target.
///
/// Only elements whose content changed are redrawn.
pub struct StatusFace<D> {
    target: D,
    icons: IconTable<Icon>,
    /// Time label
    time: TimeLabel,
    /// Date label
    date: DateLabel,
    /// Power indicator label
    battery: BatteryLabel,
    battery_color: TextColor,
    icon: Option<BatteryIcon>,
}

impl<D> StatusFace<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create new watchface and clear the display
    pub fn new(mut target: D, icons: IconTable<Icon>) -> Result<Self, D::Error> {
        target.clear(BACKGROUND_COLOR)?;
        Ok(Self {
            target,
            icons,
            time: Label::new(),
            date: Label::new(),
            battery: Label::new(),
            battery_color: TextColor::default(),
            icon: None,
        })
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }

    fn draw_battery(&mut self) -> Result<(), D::Error> {
        let position = Point::new(BATTERY_AREA.top_left.x, STATUS_LINE_Y);
        draw_label(
            &mut self.target,
            BATTERY_AREA,
            self.battery.as_str(),
            position,
            &PROFONT_14_POINT,
            self.battery_color.into(),
            Alignment::Left,
        )
    }
}

impl<D> WatchFaceView for StatusFace<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = FaceError<D::Error>;

    fn set_time_text(&mut self, text: &str) -> Result<(), Self::Error> {
        let label = TimeLabel::format(format_args!("{}", text))?;
        if label == self.time {
            return Ok(());
        }
        self.time = label;
        draw_label(
            &mut self.target,
            TIME_AREA,
            text,
            TIME_AREA.center(),
            &PROFONT_24_POINT,
            FOREGROUND_COLOR,
            Alignment::Center,
        )
        .map_err(FaceError::Draw)
    }

    fn set_date_text(&mut self, text: &str) -> Result<(), Self::Error> {
        let label = DateLabel::format(format_args!("{}", text))?;
        if label == self.date {
            return Ok(());
        }
        self.date = label;
        draw_label(
            &mut self.target,
            DATE_AREA,
            text,
            Point::new(LCD_W as i32 - MARGIN, STATUS_LINE_Y),
            &PROFONT_14_POINT,
            FOREGROUND_COLOR,
            Alignment::Right,
        )
        .map_err(FaceError::Draw)
    }

    fn set_battery_text(&mut self, text: &str) -> Result<(), Self::Error> {
        let label = BatteryLabel::format(format_args!("{}", text))?;
        if label == self.battery {
            return Ok(());
        }
        self.battery = label;
        self.draw_battery().map_err(FaceError::Draw)
    }

    fn set_battery_text_color(&mut self, color: TextColor) -> Result<(), Self::Error> {
        if color == self.battery_color {
            return Ok(());
        }
        self.battery_color = color;
        self.draw_battery().map_err(FaceError::Draw)
    }

    fn show_icon(&mut self, icon: BatteryIcon) -> Result<(), Self::Error> {
        if self.icon == Some(icon) {
            return Ok(());
        }
        self.icons
            .get(icon)
            .draw(&mut self.target, ICON_POSITION, BACKGROUND_COLOR)
            .map_err(FaceError::Draw)?;
        self.icon = Some(icon);
        Ok(())
    }
}

/// Clear `area` and draw `text` anchored at `position`, vertically centered.
fn draw_label<D>(
    target: &mut D,
    area: Rectangle,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
    alignment: Alignment,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.fill_solid(&area, BACKGROUND_COLOR)?;

    let character_style = MonoTextStyle::new(font, color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, position, character_style, text_style).draw(target)?;

    Ok(())
}
