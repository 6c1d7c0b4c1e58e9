use std::path::PathBuf;

fn main() {
    let build_shim = std::env::var("CARGO_FEATURE_DEEPSTREAM").is_ok();

    if build_shim {
        // C++ source files
        let cpp_root = PathBuf::from("cpp");
        let src_dir = cpp_root.join("src");

        let deepstream_root = std::env::var("DEEPSTREAM_ROOT")
            .unwrap_or_else(|_| "/opt/nvidia/deepstream/deepstream".to_string());
        let cuda_root =
            std::env::var("CUDA_ROOT").unwrap_or_else(|_| "/usr/local/cuda".to_string());

        let deepstream_include = PathBuf::from(&deepstream_root).join("sources/includes");
        let cuda_include = PathBuf::from(&cuda_root).join("include");

        // Bridge glue plus the shim exporting NvDsInferParseCustomYolorNms
        cxx_build::bridge("src/ffi.rs")
            .file(src_dir.join("nvdsparsebbox_yolor.cpp"))
            .include(&deepstream_include)
            .include(&cuda_include)
            .flag_if_supported("-std=c++17")
            .flag_if_supported("-Wno-unused-parameter")
            .flag_if_supported("-fPIC")
            .compile("yolor-deepstream-shim");

        println!(
            "cargo:rerun-if-changed={}",
            src_dir.join("nvdsparsebbox_yolor.cpp").display()
        );
        println!("cargo:rerun-if-changed=src/ffi.rs");
        println!("cargo:rerun-if-env-changed=DEEPSTREAM_ROOT");
    }
}
