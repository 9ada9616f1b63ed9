fn main() {
    castle_catapult::game::run();
}
