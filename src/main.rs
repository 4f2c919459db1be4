use clap::Parser;

use tcman::error::NiceError;
use tcman::opt::Opt;
use tcman::shell::main_shell;

fn main() {
    let opt = Opt::parse();
    opt.logger.enable_log();
    main_shell(opt).nice_unwrap()
}
