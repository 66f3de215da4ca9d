//! Aula web client entry point.

mod api;
mod app;
mod components;
mod containers;
mod models;
mod pages;
mod routes;

use app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
