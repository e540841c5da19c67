use cgmath::Matrix4;

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for (i, column) in result.iter_mut().enumerate() {
        for (j, value) in column.iter_mut().enumerate() {
            *value = matrix4[i][j];
        }
    }

    result
}
