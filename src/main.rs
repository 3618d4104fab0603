fn main() -> anyhow::Result<()> {
    mood_mirror_lib::run()
}
