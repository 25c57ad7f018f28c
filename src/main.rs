use std::{env, process};

use anyhow::{Context, bail};
use log::info;

use model_params::{Model, ModelSpec};

fn run(args: &[String]) -> anyhow::Result<()> {
    match args {
        [_, cmd, spec_path, out] if cmd == "init" => {
            let spec = ModelSpec::from_file(spec_path)?;
            let model = Model::from_spec(&spec)
                .with_context(|| format!("cannot build the {} model", spec.score))?;

            model
                .save(out)
                .with_context(|| format!("cannot save the model to '{out}'"))?;

            info!("wrote {} parameters to {out}", model.param_count());
        }
        [_, cmd, path] if cmd == "inspect" => {
            let model =
                Model::load(path).with_context(|| format!("cannot load the model from '{path}'"))?;
            let dims = model.dims();

            println!("score:        {}", model.variant());
            println!("loss:         {}", model.loss());
            println!("num_features: {}", dims.num_features);
            println!("num_fields:   {}", dims.num_fields);
            println!("num_factors:  {}", dims.num_factors);
            println!("params:       {}", model.param_count());
        }
        _ => {
            let bin = args.first().map_or("model_params", String::as_str);
            bail!("Usage: {bin} init <spec.json> <checkpoint> | {bin} inspect <checkpoint>");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
