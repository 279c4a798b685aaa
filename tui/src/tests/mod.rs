mod app;
mod chart;
mod theme;
