fn main() {
    gslib_pipeline::cli::run();
}
