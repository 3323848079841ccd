//! Mesh JSON 读写

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::mesh::Mesh;
use crate::Result;

/// 从文件路径加载 Mesh
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let file = File::open(path.as_ref())?;
    let mesh = load_mesh_from_reader(BufReader::new(file))?;
    log::info!(
        "[MeshIo] 读取 '{}': 顶点 {}，BlendShape {}",
        path.as_ref().display(),
        mesh.vertex_count(),
        mesh.blend_shape_count()
    );
    Ok(mesh)
}

/// 从 Reader 加载 Mesh，并校验 BlendShape 帧数据长度
pub fn load_mesh_from_reader<R: Read>(reader: R) -> Result<Mesh> {
    let mesh: Mesh = serde_json::from_reader(reader)?;
    mesh.validate_blend_shapes()?;
    Ok(mesh)
}

pub fn load_mesh_from_str(text: &str) -> Result<Mesh> {
    let mesh: Mesh = serde_json::from_str(text)?;
    mesh.validate_blend_shapes()?;
    Ok(mesh)
}

/// 保存 Mesh 到文件（格式化 JSON）
pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    save_mesh_to_writer(&mut writer, mesh)?;
    writer.flush()?;
    log::info!("[MeshIo] 写入 '{}'", path.as_ref().display());
    Ok(())
}

pub fn save_mesh_to_writer<W: Write>(writer: W, mesh: &Mesh) -> Result<()> {
    serde_json::to_writer_pretty(writer, mesh)?;
    Ok(())
}

pub fn mesh_to_string(mesh: &Mesh) -> Result<String> {
    Ok(serde_json::to_string_pretty(mesh)?)
}
