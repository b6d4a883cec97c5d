fn main() {
    notepad_ui::app::run();
}
