use clap::Parser;
use neuro_drv::RunConfig;

fn main() {
    let config = RunConfig::parse();
    neuro_drv::init_logging(config.verbose);

    match neuro_drv::run(&config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            neuro_drv::report(&config, &e);
            std::process::exit(1);
        }
    }
}
