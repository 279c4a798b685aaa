pub mod button;
pub mod candle_chart;
pub mod input_box;
pub mod popup;
pub mod scroll_bar;
pub mod text_popup;
pub mod text_scroll;
